//! Skill and required-experience extraction from vacancy text

use crate::error::{MatcherError, Result};
use crate::llm::prompts::{PromptParams, PromptTemplates};
use crate::llm::provider::ExtractionProvider;
use aho_corasick::{AhoCorasick, MatchKind};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(35);

/// Phrases that introduce a skill list in vacancy requirements
pub const DEFAULT_SKILL_TRIGGERS: &[&str] = &[
    "knowledge of",
    "experience with",
    "experience in",
    "ability to work with",
    "proficiency in",
    "familiarity with",
    "understanding of",
    "знание",
    "знания",
    "опыт работы с",
    "опыт работы со",
    "умение работать с",
    "владение",
];

/// One step of the required-experience cascade
#[derive(Debug, Clone)]
pub struct ExperienceRule {
    pub name: String,
    pattern: Regex,
}

impl ExperienceRule {
    /// `pattern` must capture the number of years in its first group
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|e| {
            MatcherError::Configuration(format!("Invalid experience rule '{}': {}", name, e))
        })?;
        Ok(Self { name, pattern })
    }

    pub fn apply(&self, text: &str) -> Option<f32> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|years| years.as_str().parse::<f32>().ok())
    }
}

/// Ordered cascade; the first rule that matches wins
pub fn default_experience_rules() -> Vec<ExperienceRule> {
    const RULES: &[(&str, &str)] = &[
        (
            "experience_at_least",
            r"(?i)experience\s+(?:of\s+)?(?:at\s+least\s+|from\s+|minimum\s+(?:of\s+)?)?(\d+)\s*\+?\s*(?:years?|yrs?)",
        ),
        (
            "experience_from_ru",
            r"(?i)опыт\s*(?:работы)?\s*(?:от)?\s*(\d+)\s*(?:\+)?\s*(?:года|лет|год)",
        ),
        (
            "plus_or_range_years",
            r"(?i)(\d+)\s*[-+–]\s*(?:\d+\s*)?(?:years?|yrs?|года|лет|год)",
        ),
        (
            "no_less_than",
            r"(?i)(?:no\s+less\s+than|at\s+least|не\s*менее)\s*(\d+)\s*(?:years?|yrs?|года|лет|год)",
        ),
    ];

    RULES
        .iter()
        .map(|(name, pattern)| ExperienceRule::new(*name, pattern).expect("Invalid built-in experience rule"))
        .collect()
}

pub struct FeatureExtractor {
    triggers: AhoCorasick,
    experience_rules: Vec<ExperienceRule>,
    prompts: PromptTemplates,
    provider: Arc<dyn ExtractionProvider>,
    timeout: Duration,
}

impl FeatureExtractor {
    pub fn new(provider: Arc<dyn ExtractionProvider>) -> Result<Self> {
        let triggers: Vec<String> = DEFAULT_SKILL_TRIGGERS.iter().map(|s| s.to_string()).collect();
        Self::with_rules(provider, triggers, default_experience_rules())
    }

    pub fn with_rules(
        provider: Arc<dyn ExtractionProvider>,
        skill_triggers: Vec<String>,
        experience_rules: Vec<ExperienceRule>,
    ) -> Result<Self> {
        let patterns: Vec<String> = skill_triggers.iter().map(|t| t.to_lowercase()).collect();
        let triggers = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| MatcherError::Configuration(format!("Failed to build skill triggers: {}", e)))?;

        Ok(Self {
            triggers,
            experience_rules,
            prompts: PromptTemplates::default(),
            provider,
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        })
    }

    /// Upper bound for a single extraction service call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.provider.complete(prompt)).await {
            Ok(response) => response,
            Err(_) => Err(MatcherError::Extraction(format!(
                "{} did not answer within {:?}",
                self.provider.name(),
                self.timeout
            ))),
        }
    }

    /// Skills from trigger phrases, or the extraction service when no
    /// trigger phrase occurs. Failures yield an empty list.
    pub async fn extract_skills(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        if let Some(skills) = self.skills_from_patterns(text) {
            debug!("Extracted {} skills from trigger phrases", skills.len());
            return skills;
        }

        info!("No skill trigger phrase found, asking {}", self.provider.name());
        let prompt = self.prompts.render_skill_extraction(&PromptParams {
            requirements: text.to_string(),
        });

        match self.complete(&prompt).await {
            Ok(response) => parse_skills_response(&response).unwrap_or_else(|| {
                warn!("Skill extraction response was not a skills object");
                Vec::new()
            }),
            Err(e) => {
                warn!("Skill extraction unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// `None` when no trigger phrase occurs anywhere in `text`
    pub fn skills_from_patterns(&self, text: &str) -> Option<Vec<String>> {
        let lowered = text.to_lowercase();
        // Slice the original text when lowercasing kept byte offsets intact
        let source = if lowered.len() == text.len() { text } else { lowered.as_str() };

        let matches: Vec<_> = self
            .triggers
            .find_iter(&lowered)
            .filter(|mat| is_word_start(&lowered, mat.start()))
            .collect();
        if matches.is_empty() {
            return None;
        }

        let mut seen = HashSet::new();
        let mut skills = Vec::new();

        for (i, mat) in matches.iter().enumerate() {
            let next_trigger = matches.get(i + 1).map_or(lowered.len(), |next| next.start());
            let tail_end = clause_end(&lowered, mat.end()).min(next_trigger);
            let tail = source
                .get(mat.end()..tail_end)
                .or_else(|| lowered.get(mat.end()..tail_end))
                .unwrap_or_default();

            for token in tail.split('/') {
                let skill = token.trim_matches(|c: char| c.is_whitespace() || ":,-–—".contains(c));
                if !skill.is_empty() && seen.insert(skill.to_lowercase()) {
                    skills.push(skill.to_string());
                }
            }
        }

        Some(skills)
    }

    /// Required years from the rule cascade, then the extraction service,
    /// then 0.
    pub async fn extract_experience(&self, text: &str) -> f32 {
        if text.trim().is_empty() {
            return 0.0;
        }

        if let Some(years) = self.experience_from_patterns(text) {
            return years;
        }

        let prompt = self.prompts.render_experience_extraction(&PromptParams {
            requirements: text.to_string(),
        });

        match self.complete(&prompt).await {
            Ok(response) => parse_years_response(&response).unwrap_or_else(|| {
                debug!("Non-numeric experience response: {:?}", response.trim());
                0.0
            }),
            Err(e) => {
                warn!("Experience extraction unavailable: {}", e);
                0.0
            }
        }
    }

    pub fn experience_from_patterns(&self, text: &str) -> Option<f32> {
        self.experience_rules.iter().find_map(|rule| {
            let years = rule.apply(text)?;
            debug!("Experience rule '{}' matched {} years", rule.name, years);
            Some(years)
        })
    }
}

fn is_word_start(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
}

/// End of the clause beginning at `from`: `;`, a newline, or a period
/// followed by whitespace or the end of the text.
fn clause_end(text: &str, from: usize) -> usize {
    let mut chars = text[from..].char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        let ends = match c {
            ';' | '\n' => true,
            '.' => chars.peek().map_or(true, |(_, next)| next.is_whitespace()),
            _ => false,
        };
        if ends {
            return from + offset;
        }
    }
    text.len()
}

/// Expects a JSON object with a `skills` string array, optionally wrapped
/// in prose or a code fence.
pub fn parse_skills_response(response: &str) -> Option<Vec<String>> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }

    let value: serde_json::Value = serde_json::from_str(&response[start..=end]).ok()?;
    let skills = value.get("skills")?.as_array()?;

    let mut seen = HashSet::new();
    Some(
        skills
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
            .map(str::to_string)
            .collect(),
    )
}

pub fn parse_years_response(response: &str) -> Option<f32> {
    let trimmed = response.trim().trim_end_matches('.');
    let years: u32 = trimmed.parse().ok()?;
    Some(years as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::OfflineProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedProvider {
        response: String,
        calls: AtomicUsize,
    }

    impl CannedProvider {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ExtractionProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn offline_extractor() -> FeatureExtractor {
        FeatureExtractor::new(Arc::new(OfflineProvider)).unwrap()
    }

    #[test]
    fn test_trigger_phrase_skills() {
        let extractor = offline_extractor();
        let text = "Requirements: knowledge of Python/Django/PostgreSQL. \
                    Experience with Docker; ability to work with Git / GitLab CI.";

        let skills = extractor.skills_from_patterns(text).unwrap();

        assert_eq!(
            skills,
            vec!["Python", "Django", "PostgreSQL", "Docker", "Git", "GitLab CI"]
        );
    }

    #[test]
    fn test_trigger_keeps_dotted_names() {
        let extractor = offline_extractor();
        let skills = extractor
            .skills_from_patterns("Knowledge of Node.js/Vue.js.")
            .unwrap();
        assert_eq!(skills, vec!["Node.js", "Vue.js"]);
    }

    #[test]
    fn test_russian_triggers_and_dedup() {
        let extractor = offline_extractor();
        let text = "Знание SQL/Python. Опыт работы с Python/Kafka.";

        let skills = extractor.skills_from_patterns(text).unwrap();

        assert_eq!(skills, vec!["SQL", "Python", "Kafka"]);
    }

    #[test]
    fn test_tail_stops_at_next_trigger() {
        let extractor = offline_extractor();
        let skills = extractor
            .skills_from_patterns("Knowledge of SQL, experience with Kafka")
            .unwrap();
        assert_eq!(skills, vec!["SQL", "Kafka"]);
    }

    #[test]
    fn test_trigger_inside_word_ignored() {
        let extractor = offline_extractor();
        assert_eq!(extractor.skills_from_patterns("Самопознание и рост"), None);
    }

    #[test]
    fn test_no_trigger() {
        let extractor = offline_extractor();
        assert_eq!(extractor.skills_from_patterns("We build payment systems"), None);
    }

    #[tokio::test]
    async fn test_skill_fallback_to_service() {
        let provider = CannedProvider::new("```json\n{\"skills\": [\"Rust\", \"Tokio\", \"rust\"]}\n```");
        let extractor = FeatureExtractor::new(provider.clone()).unwrap();

        let skills = extractor.extract_skills("We build payment systems in Rust").await;

        assert_eq!(skills, vec!["Rust", "Tokio"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_skill_fallback_malformed_response() {
        let extractor = FeatureExtractor::new(CannedProvider::new("Rust, Tokio")).unwrap();
        assert!(extractor.extract_skills("We build payment systems").await.is_empty());
    }

    #[tokio::test]
    async fn test_skill_fallback_service_failure() {
        let extractor = offline_extractor();
        assert!(extractor.extract_skills("We build payment systems").await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_skips_service() {
        let provider = CannedProvider::new("{\"skills\": [\"Rust\"]}");
        let extractor = FeatureExtractor::new(provider.clone()).unwrap();

        assert!(extractor.extract_skills("   ").await.is_empty());
        assert_eq!(extractor.extract_experience("").await, 0.0);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_experience_cascade() {
        let extractor = offline_extractor();
        let cases = [
            ("Experience of at least 3 years in backend", Some(3.0)),
            ("Commercial experience 4+ years", Some(4.0)),
            ("5+ years of Rust", Some(5.0)),
            ("2-4 years in fintech", Some(2.0)),
            ("No less than 6 years", Some(6.0)),
            ("Опыт работы от 3 лет", Some(3.0)),
            ("Требуется не менее 2 лет", Some(2.0)),
            ("Junior welcome", None),
        ];

        for (text, expected) in cases {
            assert_eq!(extractor.experience_from_patterns(text), expected, "{}", text);
        }
    }

    #[test]
    fn test_cascade_order_first_rule_wins() {
        let extractor = offline_extractor();
        let text = "At least 7 years overall, experience of at least 3 years with Rust";
        assert_eq!(extractor.experience_from_patterns(text), Some(3.0));
    }

    #[test]
    fn test_custom_rules() {
        let rules = vec![ExperienceRule::new("seniority", r"(?i)senior\s*\((\d+)\)").unwrap()];
        let extractor =
            FeatureExtractor::with_rules(Arc::new(OfflineProvider), vec![], rules).unwrap();
        assert_eq!(extractor.experience_from_patterns("Senior (8)"), Some(8.0));
    }

    #[test]
    fn test_invalid_rule_rejected() {
        assert!(ExperienceRule::new("broken", r"(\d+").is_err());
    }

    #[tokio::test]
    async fn test_experience_fallback() {
        let extractor = FeatureExtractor::new(CannedProvider::new(" 4\n")).unwrap();
        assert_eq!(extractor.extract_experience("Seasoned engineer").await, 4.0);

        let extractor = FeatureExtractor::new(CannedProvider::new("about four")).unwrap();
        assert_eq!(extractor.extract_experience("Seasoned engineer").await, 0.0);

        assert_eq!(offline_extractor().extract_experience("Seasoned engineer").await, 0.0);
    }

    struct StalledProvider;

    #[async_trait]
    impl ExtractionProvider for StalledProvider {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_service_times_out() {
        let extractor = FeatureExtractor::new(Arc::new(StalledProvider))
            .unwrap()
            .with_timeout(Duration::from_millis(50));

        let skills = tokio::time::timeout(
            Duration::from_secs(5),
            extractor.extract_skills("We build payment systems"),
        )
        .await
        .expect("skill extraction should give up on a stalled service");
        assert!(skills.is_empty());

        let years = tokio::time::timeout(
            Duration::from_secs(5),
            extractor.extract_experience("Seasoned engineer"),
        )
        .await
        .expect("experience extraction should give up on a stalled service");
        assert_eq!(years, 0.0);
    }

    #[test]
    fn test_parse_years_response() {
        assert_eq!(parse_years_response("3"), Some(3.0));
        assert_eq!(parse_years_response("3."), Some(3.0));
        assert_eq!(parse_years_response("-1"), None);
        assert_eq!(parse_years_response(""), None);
    }
}
