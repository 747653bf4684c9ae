//! CLI interface for the vacancy matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "vacancy-matcher")]
#[command(about = "Score how well a resume fits a vacancy")]
#[command(long_about = "Compare a candidate profile with a vacancy using position, experience and skill matching, with optional embedding similarity from an Ollama-compatible host")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume against a vacancy
    Match {
        /// Path to the resume JSON body
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to the vacancy JSON body
        #[arg(short = 'j', long)]
        vacancy: PathBuf,

        /// Output format: console, json (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Show the per-component score breakdown
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip the embedding and extraction services
        #[arg(long)]
        offline: bool,
    },

    /// Validate request bodies without scoring them
    Validate {
        /// Path to the resume JSON body
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to the vacancy JSON body
        #[arg(short = 'j', long)]
        vacancy: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
