//! Prompts for the extraction fallbacks

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub skill_extraction: String,
    pub experience_extraction: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            skill_extraction: SKILL_EXTRACTION_TEMPLATE.to_string(),
            experience_extraction: EXPERIENCE_EXTRACTION_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub requirements: String,
}

impl PromptTemplates {
    pub fn render_skill_extraction(&self, params: &PromptParams) -> String {
        self.skill_extraction.replace("{text}", &params.requirements)
    }

    pub fn render_experience_extraction(&self, params: &PromptParams) -> String {
        self.experience_extraction.replace("{text}", &params.requirements)
    }
}

const SKILL_EXTRACTION_TEMPLATE: &str = r#"TASK: List the professional skills a candidate needs for the vacancy below.

<VACANCY REQUIREMENTS>
{text}
</VACANCY REQUIREMENTS>

Answer strictly with a JSON object and nothing else:
{"skills": ["skill 1", "skill 2"]}

Keep each skill short (a technology, tool or competence), in the language of the vacancy."#;

const EXPERIENCE_EXTRACTION_TEMPLATE: &str = r#"Determine the required work experience in years from the vacancy text. Answer with a single number only.

Text: {text}

Example answers: 3, 5, 0 (if experience is not mentioned)"#;
