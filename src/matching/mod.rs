//! Comparators for each aspect of a match and the score aggregator

pub mod aggregator;
pub mod experience;
pub mod position;
pub mod skills;

pub use aggregator::{MatchResult, ScoreAggregator, ScoreBreakdown};
pub use experience::{compare_experience, ExperienceComparison};
pub use position::{PositionComparator, PositionComparison};
pub use skills::{SkillComparator, SkillComparison, SkillRequirement};
