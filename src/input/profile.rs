//! Request bodies accepted by the matcher

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One job stint on a resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperiencePeriod {
    pub start_date: NaiveDate,
    /// `None` means the candidate still holds the position
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub position: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub experiences: Vec<ExperiencePeriod>,
    #[serde(default)]
    pub about_me: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyProfile {
    #[serde(alias = "position")]
    pub title: String,
    #[serde(default)]
    pub requirements: String,
    /// Explicit skill list; extracted from `requirements` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    /// Explicit years of experience; extracted from `requirements` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_work_experience: Option<f32>,
}

impl ExperiencePeriod {
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
            company_name: None,
            position: None,
        }
    }
}

impl CandidateProfile {
    pub fn new(position: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            uuid: None,
            full_name: None,
            position: position.into(),
            skills,
            experiences: Vec::new(),
            about_me: String::new(),
        }
    }

    pub fn with_experience(mut self, period: ExperiencePeriod) -> Self {
        self.experiences.push(period);
        self
    }
}

impl VacancyProfile {
    pub fn new(title: impl Into<String>, requirements: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            requirements: requirements.into(),
            skills: None,
            general_work_experience: None,
        }
    }

    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn with_experience(mut self, years: f32) -> Self {
        self.general_work_experience = Some(years);
        self
    }
}
