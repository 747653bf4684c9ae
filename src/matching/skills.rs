//! Skill-by-skill comparison of requirements against a candidate

use crate::processing::embeddings::EmbeddingCache;
use crate::processing::text_processor::TextProcessor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const YEARS_PATTERN: &str = r"(?i)(\d+)\s*\+?\s*(?:years?|yrs?|год[ау]?|лет)";
const QUALIFIER_PATTERN: &str = r"(?i)(?:\b(?:at\s+least|minimum|min|от|не\s+менее)\s*)?\d+\s*\+?\s*(?:years?|yrs?|год[ау]?|лет)(?:\s+(?:of|in|with)\s+)?";
const PART_SEPARATOR_PATTERN: &str = r"(?i)\s+(?:and|и)\s+|\s*,\s*";

fn years_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(YEARS_PATTERN).expect("Invalid years regex"))
}

fn qualifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(QUALIFIER_PATTERN).expect("Invalid qualifier regex"))
}

fn part_separator_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(PART_SEPARATOR_PATTERN).expect("Invalid separator regex"))
}

/// Years mentioned in a skill entry, e.g. 5 for "SQL — 5 years"
pub fn parse_years(text: &str) -> Option<u32> {
    years_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|years| years.as_str().parse().ok())
}

/// One required skill with its optional years qualifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub raw: String,
    pub years: Option<u32>,
}

impl SkillRequirement {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
            years: parse_years(raw),
        }
    }

    /// Lowercased skill phrase with the years qualifier removed
    pub fn base_phrase(&self) -> String {
        let lowered = self.raw.to_lowercase();
        let stripped = qualifier_regex().replace_all(&lowered, " ");
        stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_matches(|c: char| c.is_whitespace() || "-–—:,()".contains(c))
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillMatchKind {
    /// Years-qualified requirement met by a candidate entry
    Experienced,
    /// Embedding similarity above the threshold, or identical text
    Similar,
    /// Enough of the requirement's parts found verbatim
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub requirement: String,
    pub kind: SkillMatchKind,
    pub weight: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillComparison {
    pub matched_weight: f32,
    pub total: usize,
    pub matched: Vec<SkillMatch>,
    pub missing: Vec<String>,
}

impl SkillComparison {
    /// Matched weight over requirement count; 0 when nothing is required
    pub fn coverage(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.matched_weight / self.total as f32
        }
    }
}

pub struct SkillComparator {
    similarity_threshold: f32,
    partial_credit: f32,
}

impl SkillComparator {
    pub fn new(similarity_threshold: f32, partial_credit: f32) -> Self {
        Self {
            similarity_threshold,
            partial_credit,
        }
    }

    pub fn compare(
        &self,
        candidate_skills: &[String],
        required: &[SkillRequirement],
        processor: &TextProcessor,
        embeddings: &EmbeddingCache,
    ) -> SkillComparison {
        let candidate_lower: Vec<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();
        let candidate_normalized: Vec<String> =
            candidate_skills.iter().map(|s| processor.normalize(s)).collect();

        let mut result = SkillComparison {
            total: required.len(),
            ..SkillComparison::default()
        };

        for requirement in required {
            let outcome = match requirement.years {
                Some(years) => self
                    .years_qualified_match(requirement, years, &candidate_lower)
                    .then_some((SkillMatchKind::Experienced, 1.0)),
                None => self.free_match(requirement, &candidate_lower, &candidate_normalized, processor, embeddings),
            };

            match outcome {
                Some((kind, weight)) => {
                    result.matched_weight += weight;
                    result.matched.push(SkillMatch {
                        requirement: requirement.raw.clone(),
                        kind,
                        weight,
                    });
                }
                None => result.missing.push(requirement.raw.clone()),
            }
        }

        result
    }

    fn years_qualified_match(&self, requirement: &SkillRequirement, years: u32, candidate_lower: &[String]) -> bool {
        let base = requirement.base_phrase();
        if base.is_empty() {
            return false;
        }
        candidate_lower
            .iter()
            .filter(|candidate| candidate.contains(&base))
            .any(|candidate| parse_years(candidate).unwrap_or(0) >= years)
    }

    fn free_match(
        &self,
        requirement: &SkillRequirement,
        candidate_lower: &[String],
        candidate_normalized: &[String],
        processor: &TextProcessor,
        embeddings: &EmbeddingCache,
    ) -> Option<(SkillMatchKind, f32)> {
        let required_normalized = processor.normalize(&requirement.raw);

        let best_similarity = candidate_normalized
            .iter()
            .filter_map(|candidate| {
                if !required_normalized.is_empty() && *candidate == required_normalized {
                    Some(1.0)
                } else {
                    embeddings.similarity(&required_normalized, candidate)
                }
            })
            .fold(None, |best: Option<f32>, s| Some(best.map_or(s, |b| b.max(s))));

        if best_similarity.is_some_and(|s| s >= self.similarity_threshold) {
            return Some((SkillMatchKind::Similar, 1.0));
        }

        let lowered = requirement.raw.to_lowercase();
        let parts: Vec<&str> = part_separator_regex()
            .split(&lowered)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            return None;
        }

        let matched_parts = parts
            .iter()
            .filter(|part| candidate_lower.iter().any(|candidate| candidate.contains(*part)))
            .count();

        (matched_parts as f32 / parts.len() as f32 >= 0.5).then_some((SkillMatchKind::Partial, self.partial_credit))
    }
}
