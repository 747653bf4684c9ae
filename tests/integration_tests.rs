//! Integration tests for the vacancy matcher

use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use vacancy_matcher::input::manager::InputManager;
use vacancy_matcher::input::validation::validate_request;
use vacancy_matcher::input::{CandidateProfile, ExperiencePeriod, VacancyProfile};
use vacancy_matcher::llm::{EmbeddingProvider, OfflineProvider};
use vacancy_matcher::processing::embeddings::EmbeddingVector;
use vacancy_matcher::{Config, MatchEngine, MatcherError};

/// Deterministic bag-of-words embedder
struct HashingEmbedder;

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    async fn embed(&self, text: &str) -> EmbeddingVector {
        let mut values = vec![0.0; 32];
        for word in text.split_whitespace() {
            let bucket = word
                .bytes()
                .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
                % values.len();
            values[bucket] += 1.0;
        }
        EmbeddingVector::from_values(values)
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn offline_engine() -> MatchEngine {
    MatchEngine::offline(&Config::default())
        .unwrap()
        .with_reference_date(date(2024, 1, 1))
}

fn embedding_engine() -> MatchEngine {
    MatchEngine::new(&Config::default(), Arc::new(HashingEmbedder), Arc::new(OfflineProvider))
        .unwrap()
        .with_reference_date(date(2024, 1, 1))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn two_year_resume(position: &str, skills: &[&str]) -> CandidateProfile {
    CandidateProfile::new(position, strings(skills))
        .with_experience(ExperiencePeriod::new(date(2018, 1, 1), Some(date(2020, 1, 1))))
}

#[tokio::test]
async fn test_identical_profiles_score_full_marks() {
    let resume = two_year_resume("Backend developer", &["Python", "Django", "Docker"]);
    let vacancy = VacancyProfile::new("Backend developer", "")
        .with_skills(strings(&["Python", "Django", "Docker"]))
        .with_experience(2.0);

    let result = offline_engine().compare(&resume, &vacancy).await.unwrap();
    assert_eq!(result.match_percentage, 100);
    assert!(result.didnt_match.is_empty());

    let result = embedding_engine().compare(&resume, &vacancy).await.unwrap();
    assert_eq!(result.match_percentage, 100);
    assert!(result.didnt_match.is_empty());
}

#[tokio::test]
async fn test_score_is_bounded() {
    let cases = [
        (two_year_resume("Accountant", &["Excel"]), VacancyProfile::new("Rust engineer", "").with_skills(strings(&["Rust", "Tokio"])).with_experience(10.0)),
        (two_year_resume("Rust engineer", &["Rust", "Tokio"]), VacancyProfile::new("Rust engineer", "").with_skills(strings(&["Rust"])).with_experience(0.0)),
        (CandidateProfile::new("Intern", strings(&["Git"])), VacancyProfile::new("Principal architect", "At least 15 years of experience")),
    ];

    for engine in [offline_engine(), embedding_engine()] {
        for (resume, vacancy) in &cases {
            let result = engine.compare(resume, vacancy).await.unwrap();
            assert!(result.match_percentage <= 100);
        }
    }
}

#[tokio::test]
async fn test_adding_matching_skill_never_lowers_score() {
    let vacancy = VacancyProfile::new("Backend engineer", "")
        .with_skills(strings(&["Python", "Docker", "Kafka"]))
        .with_experience(2.0);
    let engine = offline_engine();

    let mut skills = vec!["Python"];
    let mut previous = engine
        .compare(&two_year_resume("Backend developer", &skills), &vacancy)
        .await
        .unwrap()
        .match_percentage;

    for extra in ["Docker", "Kafka"] {
        skills.push(extra);
        let current = engine
            .compare(&two_year_resume("Backend developer", &skills), &vacancy)
            .await
            .unwrap()
            .match_percentage;
        assert!(current >= previous, "{} dropped the score from {} to {}", extra, previous, current);
        previous = current;
    }
    assert_eq!(previous, 100);
}

#[tokio::test]
async fn test_adding_matching_skill_never_lowers_blended_score() {
    let vacancy = VacancyProfile::new("Backend engineer", "")
        .with_skills(strings(&["Python", "Docker", "Kafka"]))
        .with_experience(2.0);
    let engine = embedding_engine();

    let mut skills = vec!["Python"];
    let mut previous = engine
        .compare_detailed(&two_year_resume("Backend developer", &skills), &vacancy)
        .await
        .unwrap();

    for extra in ["Docker", "Kafka"] {
        skills.push(extra);
        let current = engine
            .compare_detailed(&two_year_resume("Backend developer", &skills), &vacancy)
            .await
            .unwrap();
        assert!(current.breakdown.composite_similarity.is_some());
        assert!(current.breakdown.base_score >= previous.breakdown.base_score);
        assert!(
            current.result.match_percentage >= previous.result.match_percentage,
            "{} dropped the score from {} to {}",
            extra,
            previous.result.match_percentage,
            current.result.match_percentage
        );
        previous = current;
    }
    assert!(previous.result.match_percentage <= 100);
}

#[tokio::test]
async fn test_vacancy_without_skill_requirements() {
    let resume = two_year_resume("Backend developer", &["Python"]);
    let vacancy = VacancyProfile::new("Backend developer", "Friendly team, remote work");

    let report = offline_engine().compare_detailed(&resume, &vacancy).await.unwrap();
    assert_eq!(report.skills.total, 0);
    assert_eq!(report.breakdown.skills_score, 0.0);
    assert!(report.result.match_percentage <= 100);
    assert!(!report.result.didnt_match.iter().any(|m| m.starts_with("Missing skills")));
}

#[tokio::test]
async fn test_experience_shortfall_reported_once() {
    let resume = two_year_resume("Backend developer", &["Python"]);
    let vacancy = VacancyProfile::new("Backend developer", "")
        .with_skills(strings(&["Python"]))
        .with_experience(5.0);

    let result = offline_engine().compare(&resume, &vacancy).await.unwrap();
    let shortfalls: Vec<_> = result.didnt_match.iter().filter(|m| m.contains("short by")).collect();
    assert_eq!(shortfalls.len(), 1);
    assert!(shortfalls[0].contains("short by 3.0 years"));
    assert_eq!(result.didnt_match.len(), 1);
}

#[tokio::test]
async fn test_comparison_is_idempotent() {
    let resume = two_year_resume("Data engineer", &["Python", "Spark", "SQL — 3 years"]);
    let vacancy = VacancyProfile::new("Big data engineer", "")
        .with_skills(strings(&["Spark", "2 years of SQL", "Airflow and Kafka"]))
        .with_experience(3.0);

    let engine = embedding_engine();
    let first = engine.compare(&resume, &vacancy).await.unwrap();
    let second = engine.compare(&resume, &vacancy).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_similar_titles_match_without_embeddings() {
    let resume = two_year_resume("backend developer", &["Go"]);
    let vacancy = VacancyProfile::new("backend engineer", "")
        .with_skills(strings(&["Go"]))
        .with_experience(1.0);

    let report = offline_engine().compare_detailed(&resume, &vacancy).await.unwrap();
    assert!(report.position.matched);
    assert!(report.result.didnt_match.is_empty());
}

#[tokio::test]
async fn test_match_from_fixture_files() {
    let manager = InputManager::new();
    let resume = manager
        .load_resume(Path::new("tests/fixtures/sample_resume.json"))
        .await
        .unwrap();
    let vacancy = manager
        .load_vacancy(Path::new("tests/fixtures/sample_vacancy.json"))
        .await
        .unwrap();
    validate_request(&resume, &vacancy).unwrap();

    let report = offline_engine().compare_detailed(&resume, &vacancy).await.unwrap();
    assert_eq!(report.resume_features.years_of_experience(), 5.9);
    assert_eq!(report.vacancy_features.years_of_experience(), 3.0);
    assert_eq!(
        report.vacancy_features.skills(),
        &strings(&["Python", "Django", "PostgreSQL"])[..]
    );
    assert!(report.result.didnt_match.is_empty());
    assert!(report.result.matched.contains(&"Skill: PostgreSQL (partial)".to_string()));
    assert_eq!(report.result.match_percentage, 91);
}

#[tokio::test]
async fn test_nonexistent_file() {
    let manager = InputManager::new();
    let result = manager.load_resume(Path::new("tests/fixtures/nonexistent.json")).await;
    assert!(matches!(result, Err(MatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.json");
    std::fs::write(&path, r#"{"position": "Developer", "skills": "#).unwrap();

    let err = InputManager::new().load_resume(&path).await.unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_negative_experience_rejected() {
    let manager = InputManager::new();
    let resume = manager
        .load_resume(Path::new("tests/fixtures/sample_resume.json"))
        .await
        .unwrap();
    let vacancy = manager
        .load_vacancy(Path::new("tests/fixtures/invalid_vacancy.json"))
        .await
        .unwrap();

    let err = validate_request(&resume, &vacancy).unwrap_err();
    assert!(err.is_client_error());

    let empty = CandidateProfile::new("Backend developer", Vec::new());
    assert!(validate_request(&empty, &VacancyProfile::new("Backend engineer", "")).is_err());
}

#[test]
fn test_config_file_overrides_weights() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[scoring]\nposition_weight = 30.0\n\n[services]\nenabled = false\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.scoring.position_weight, 30.0);
    assert_eq!(config.scoring.skills_weight, 50.0);
    assert!(!config.services.enabled);
    assert!(MatchEngine::from_config(&config).is_ok());
}
