//! Input processing module
//! Handles request bodies, their validation and loading from disk

pub mod manager;
pub mod profile;
pub mod validation;

pub use profile::{CandidateProfile, ExperiencePeriod, VacancyProfile};
