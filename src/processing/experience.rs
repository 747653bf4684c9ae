//! Years of experience from employment periods

use crate::input::profile::ExperiencePeriod;
use chrono::NaiveDate;
use log::debug;

const DAYS_PER_YEAR: f32 = 365.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExperienceCalculator {
    merge_overlaps: bool,
}

impl ExperienceCalculator {
    pub fn new(merge_overlaps: bool) -> Self {
        Self { merge_overlaps }
    }

    /// Total years across `periods`, rounded to one decimal.
    ///
    /// Open-ended periods run until `today`. Periods that start after they
    /// end are skipped. Overlapping periods are counted once per period
    /// unless overlap merging is enabled.
    pub fn total_years(&self, periods: &[ExperiencePeriod], today: NaiveDate) -> f32 {
        let spans = Self::valid_spans(periods, today);

        let total_days = if self.merge_overlaps {
            Self::merged_days(spans)
        } else {
            spans.iter().map(|(start, end)| (*end - *start).num_days()).sum()
        };

        round_one_decimal(total_days as f32 / DAYS_PER_YEAR)
    }

    fn valid_spans(periods: &[ExperiencePeriod], today: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
        periods
            .iter()
            .filter_map(|period| {
                let end = period.end_date.unwrap_or(today);
                if period.start_date > end {
                    debug!(
                        "Skipping experience period starting {} after its end {}",
                        period.start_date, end
                    );
                    None
                } else {
                    Some((period.start_date, end))
                }
            })
            .collect()
    }

    fn merged_days(mut spans: Vec<(NaiveDate, NaiveDate)>) -> i64 {
        spans.sort();

        let mut total = 0;
        let mut current: Option<(NaiveDate, NaiveDate)> = None;

        for (start, end) in spans {
            current = match current {
                Some((cur_start, cur_end)) if start <= cur_end => Some((cur_start, cur_end.max(end))),
                Some((cur_start, cur_end)) => {
                    total += (cur_end - cur_start).num_days();
                    Some((start, end))
                }
                None => Some((start, end)),
            };
        }

        if let Some((start, end)) = current {
            total += (end - start).num_days();
        }
        total
    }
}

pub(crate) fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
