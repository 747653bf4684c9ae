//! Match engine combining feature extraction, comparators and scoring

use crate::config::{Config, ScoringConfig};
use crate::error::{MatcherError, Result};
use crate::input::{CandidateProfile, VacancyProfile};
use crate::llm::{EmbeddingProvider, ExtractionProvider, OfflineProvider, OllamaClient};
use crate::matching::{
    compare_experience, ExperienceComparison, MatchResult, PositionComparator, PositionComparison,
    ScoreAggregator, ScoreBreakdown, SkillComparator, SkillComparison, SkillRequirement,
};
use crate::processing::embeddings::EmbeddingCache;
use crate::processing::experience::ExperienceCalculator;
use crate::processing::extractor::FeatureExtractor;
use crate::processing::features::AnalyzedFeatureSet;
use crate::processing::text_processor::TextProcessor;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Coordinates one resume/vacancy comparison end to end
pub struct MatchEngine {
    embeddings: Arc<dyn EmbeddingProvider>,
    extractor: FeatureExtractor,
    processor: TextProcessor,
    calculator: ExperienceCalculator,
    scoring: ScoringConfig,
    reference_date: Option<NaiveDate>,
    embedding_timeout: Duration,
}

/// Verdict together with everything that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub result: MatchResult,
    pub breakdown: ScoreBreakdown,
    pub position: PositionComparison,
    pub experience: ExperienceComparison,
    pub skills: SkillComparison,
    pub resume_features: AnalyzedFeatureSet,
    pub vacancy_features: AnalyzedFeatureSet,
    pub processing_time_ms: u64,
}

impl MatchEngine {
    /// Create an engine with explicit collaborators
    pub fn new(
        config: &Config,
        embeddings: Arc<dyn EmbeddingProvider>,
        extraction: Arc<dyn ExtractionProvider>,
    ) -> Result<Self> {
        config.scoring.validate()?;
        let service_timeout = Duration::from_secs(
            config.services.request_timeout_secs + config.services.connect_timeout_secs,
        );

        Ok(Self {
            embeddings,
            extractor: FeatureExtractor::new(extraction)?.with_timeout(service_timeout),
            processor: TextProcessor::new(config.processing.stop_word_language),
            calculator: ExperienceCalculator::new(config.processing.merge_overlapping_periods),
            scoring: config.scoring.clone(),
            reference_date: None,
            embedding_timeout: service_timeout,
        })
    }

    /// Create an engine backed by the configured service host, or by the
    /// offline provider when services are disabled
    pub fn from_config(config: &Config) -> Result<Self> {
        if !config.services.enabled {
            return Self::offline(config);
        }

        let client = Arc::new(OllamaClient::new(&config.services)?);
        info!("Using embedding and extraction host {}", client.host());
        Self::new(config, client.clone(), client)
    }

    pub fn offline(config: &Config) -> Result<Self> {
        info!("External services disabled, using deterministic fallbacks");
        Self::new(config, Arc::new(OfflineProvider), Arc::new(OfflineProvider))
    }

    /// Fix "today" for open-ended experience periods
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn analyze_resume(&self, resume: &CandidateProfile) -> Result<AnalyzedFeatureSet> {
        let years = self.calculator.total_years(&resume.experiences, self.today());
        AnalyzedFeatureSet::new(resume.position.as_str(), resume.skills.clone(), years)
    }

    /// Explicit vacancy data wins over extraction from the requirements text
    pub async fn analyze_vacancy(&self, vacancy: &VacancyProfile) -> Result<AnalyzedFeatureSet> {
        let skills = async {
            match &vacancy.skills {
                Some(skills) => skills.clone(),
                None => self.extractor.extract_skills(&vacancy.requirements).await,
            }
        };
        let years = async {
            match vacancy.general_work_experience {
                Some(years) => years,
                None => self.extractor.extract_experience(&vacancy.requirements).await,
            }
        };

        let (skills, years) = tokio::join!(skills, years);
        AnalyzedFeatureSet::new(vacancy.title.as_str(), skills, years)
    }

    pub async fn compare(&self, resume: &CandidateProfile, vacancy: &VacancyProfile) -> Result<MatchResult> {
        Ok(self.compare_detailed(resume, vacancy).await?.result)
    }

    pub async fn compare_detailed(
        &self,
        resume: &CandidateProfile,
        vacancy: &VacancyProfile,
    ) -> Result<MatchReport> {
        let start_time = Instant::now();

        let resume_features = self.analyze_resume(resume).map_err(comparison_failed)?;
        let vacancy_features = self.analyze_vacancy(vacancy).await.map_err(comparison_failed)?;
        debug!(
            "Resume: {} skills, {} years; vacancy: {} skills, {} years",
            resume_features.skills().len(),
            resume_features.years_of_experience(),
            vacancy_features.skills().len(),
            vacancy_features.years_of_experience()
        );

        let requirements: Vec<SkillRequirement> = vacancy_features
            .skills()
            .iter()
            .map(|skill| SkillRequirement::parse(skill))
            .collect();

        let resume_composite = resume_features.composite_text();
        let vacancy_composite = vacancy_features.composite_text();

        let cache = EmbeddingCache::prefetch(
            Arc::clone(&self.embeddings),
            self.embedding_texts(&resume_features, &vacancy_features, &requirements, [
                resume_composite.clone(),
                vacancy_composite.clone(),
            ]),
            self.embedding_timeout,
        )
        .await;

        let position = PositionComparator::new(self.scoring.position_similarity_threshold).compare(
            resume_features.position(),
            vacancy_features.position(),
            &self.processor,
            &cache,
        );
        let experience = compare_experience(
            resume_features.years_of_experience(),
            vacancy_features.years_of_experience(),
            self.scoring.experience_tolerance,
        );
        let skills = SkillComparator::new(self.scoring.skill_similarity_threshold, self.scoring.partial_match_credit)
            .compare(resume_features.skills(), &requirements, &self.processor, &cache);
        let composite_similarity = cache.similarity(&resume_composite, &vacancy_composite);

        let (result, breakdown) =
            ScoreAggregator::new(self.scoring.clone()).aggregate(&position, &experience, &skills, composite_similarity);

        let processing_time = start_time.elapsed();
        info!(
            "Match score {}% ({} unmet aspects) in {:.2?}",
            result.match_percentage,
            result.didnt_match.len(),
            processing_time
        );

        Ok(MatchReport {
            result,
            breakdown,
            position,
            experience,
            skills,
            resume_features,
            vacancy_features,
            processing_time_ms: processing_time.as_millis() as u64,
        })
    }

    /// Every text a comparison may look up in the embedding cache
    fn embedding_texts(
        &self,
        resume: &AnalyzedFeatureSet,
        vacancy: &AnalyzedFeatureSet,
        requirements: &[SkillRequirement],
        composites: [String; 2],
    ) -> Vec<String> {
        let mut texts = vec![
            self.processor.normalize(resume.position()),
            self.processor.normalize(vacancy.position()),
        ];
        texts.extend(resume.skills().iter().map(|skill| self.processor.normalize(skill)));
        texts.extend(
            requirements
                .iter()
                .filter(|requirement| requirement.years.is_none())
                .map(|requirement| self.processor.normalize(&requirement.raw)),
        );
        texts.extend(composites);
        texts
    }
}

fn comparison_failed(err: MatcherError) -> MatcherError {
    MatcherError::ComparisonFailed(err.to_string())
}
