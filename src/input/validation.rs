//! Request validation performed before the engine runs

use crate::error::{MatcherError, Result};
use crate::input::profile::{CandidateProfile, VacancyProfile};

/// Reject requests the engine must never see: negative or non-finite
/// experience figures and empty skill lists.
pub fn validate_request(resume: &CandidateProfile, vacancy: &VacancyProfile) -> Result<()> {
    if resume.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(MatcherError::InvalidInput(
            "Resume skills must not be empty".to_string(),
        ));
    }

    if let Some(skills) = &vacancy.skills {
        if skills.iter().all(|s| s.trim().is_empty()) {
            return Err(MatcherError::InvalidInput(
                "Vacancy skills must not be empty when provided".to_string(),
            ));
        }
    }

    if let Some(years) = vacancy.general_work_experience {
        if !years.is_finite() {
            return Err(MatcherError::InvalidInput(
                "Vacancy experience must be a finite number".to_string(),
            ));
        }
        if years < 0.0 {
            return Err(MatcherError::InvalidInput(
                "Vacancy experience must not be negative".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume() -> CandidateProfile {
        CandidateProfile::new("Backend developer", vec!["Python".to_string()])
    }

    #[test]
    fn test_valid_request() {
        let vacancy = VacancyProfile::new("Backend engineer", "Python").with_experience(2.0);
        assert!(validate_request(&resume(), &vacancy).is_ok());
    }

    #[test]
    fn test_empty_resume_skills() {
        let resume = CandidateProfile::new("Backend developer", vec!["  ".to_string()]);
        let vacancy = VacancyProfile::new("Backend engineer", "");
        let err = validate_request(&resume, &vacancy).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_explicitly_empty_vacancy_skills() {
        let vacancy = VacancyProfile::new("Backend engineer", "").with_skills(vec![]);
        assert!(validate_request(&resume(), &vacancy).is_err());
    }

    #[test]
    fn test_negative_experience() {
        let vacancy = VacancyProfile::new("Backend engineer", "").with_experience(-1.0);
        let err = validate_request(&resume(), &vacancy).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_nan_experience() {
        let vacancy = VacancyProfile::new("Backend engineer", "").with_experience(f32::NAN);
        assert!(validate_request(&resume(), &vacancy).is_err());
    }
}
