//! Vacancy matcher: score how well a resume fits a vacancy

use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process;
use vacancy_matcher::cli::{self, Cli, Commands, ConfigAction};
use vacancy_matcher::input::manager::InputManager;
use vacancy_matcher::input::validation::validate_request;
use vacancy_matcher::input::{CandidateProfile, VacancyProfile};
use vacancy_matcher::output::formatter::{save_report_to_file, ReportGenerator};
use vacancy_matcher::processing::MatchEngine;
use vacancy_matcher::{Config, MatcherError, Result};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            vacancy,
            output,
            detailed,
            save,
            offline,
        } => {
            info!("Starting vacancy match");

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let input_manager = InputManager::new();
            let (resume, vacancy) = load_request(&input_manager, &resume, &vacancy).await?;
            validate_request(&resume, &vacancy)?;

            let engine = if offline {
                MatchEngine::offline(&config)?
            } else {
                MatchEngine::from_config(&config)?
            };
            let report = engine.compare_detailed(&resume, &vacancy).await?;

            let generator = ReportGenerator::new(config.output.color_output, detailed, config.scoring.clone());
            let content = generator.generate_report(&report, &output_format)?;
            println!("{}", content);

            if let Some(save_path) = save {
                // Saved files never carry color codes
                let plain = ReportGenerator::new(false, detailed, config.scoring.clone());
                save_report_to_file(&plain.generate_report(&report, &output_format)?, &save_path)?;
                info!("Report saved to {}", save_path.display());
            }
        }

        Commands::Validate { resume, vacancy } => {
            let input_manager = InputManager::new();
            let (resume, vacancy) = load_request(&input_manager, &resume, &vacancy).await?;
            validate_request(&resume, &vacancy)?;
            println!("✅ Request is valid");
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("{}", config.to_toml()?);
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

async fn load_request(
    input_manager: &InputManager,
    resume: &Path,
    vacancy: &Path,
) -> Result<(CandidateProfile, VacancyProfile)> {
    cli::validate_file_extension(resume, &["json"])
        .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;
    cli::validate_file_extension(vacancy, &["json"])
        .map_err(|e| MatcherError::InvalidInput(format!("Vacancy file: {}", e)))?;

    let resume = input_manager.load_resume(resume).await?;
    let vacancy = input_manager.load_vacancy(vacancy).await?;
    Ok((resume, vacancy))
}
