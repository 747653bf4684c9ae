//! Output formatters for match verdicts

use crate::config::{OutputFormat, ScoringConfig};
use crate::error::Result;
use crate::matching::MatchResult;
use crate::processing::MatchReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored score badge and aspect lists
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    weights: ScoringConfig,
}

/// JSON formatter emitting the `MatchResult` body only
pub struct JsonFormatter {
    pretty: bool,
}

/// Picks the formatter for the requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, weights: ScoringConfig) -> Self {
        Self {
            use_colors,
            detailed,
            weights,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn score_color(score: u8) -> Color {
        match score {
            75..=100 => Color::Green,
            50..=74 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let badge = match score {
            90..=100 => "EXCELLENT",
            75..=89 => "GOOD",
            50..=74 => "FAIR",
            _ => "POOR",
        };

        if self.use_colors {
            format!("[{}]", badge.color(Self::score_color(score)).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("VACANCY MATCH", 1));
        output.push_str(&format!(
            "'{}' against '{}'\n",
            report.resume_features.position(),
            report.vacancy_features.position()
        ));
        output.push_str(&format!(
            "Match: {} {}\n",
            self.colorize(&format!("{}%", result.match_percentage), Self::score_color(result.match_percentage)),
            self.format_score_badge(result.match_percentage)
        ));

        if !result.matched.is_empty() {
            output.push_str(&self.format_header("Matched", 2));
            for aspect in &result.matched {
                output.push_str(&format!("  ✓ {}\n", self.colorize(aspect, Color::Green)));
            }
        }

        if !result.didnt_match.is_empty() {
            output.push_str(&self.format_header("Not matched", 2));
            for aspect in &result.didnt_match {
                output.push_str(&format!("  ✗ {}\n", self.colorize(aspect, Color::Red)));
            }
        }

        if self.detailed {
            let breakdown = &report.breakdown;
            output.push_str(&self.format_header("Score Breakdown", 3));
            output.push_str(&format!(
                "Position:   {:.1} / {}\n",
                breakdown.position_score, self.weights.position_weight
            ));
            output.push_str(&format!(
                "Experience: {:.1} / {}\n",
                breakdown.experience_score, self.weights.experience_weight
            ));
            output.push_str(&format!(
                "Skills:     {:.1} / {} ({:.1} of {} requirements met)\n",
                breakdown.skills_score,
                self.weights.skills_weight,
                report.skills.matched_weight,
                report.skills.total
            ));
            output.push_str(&format!("Base score: {:.1}\n", breakdown.base_score));
            match breakdown.composite_similarity {
                Some(similarity) => output.push_str(&format!(
                    "Profile similarity: {:.3} (blend {:.0}%)\n",
                    similarity,
                    self.weights.embedding_blend * 100.0
                )),
                None => output.push_str("Profile similarity: unavailable\n"),
            }
            output.push_str(&format!("Processing time: {}ms\n", report.processing_time_ms));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format_result(&self, result: &MatchResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.format_result(&report.result)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool, weights: ScoringConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, weights),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
