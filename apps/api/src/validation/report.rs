//! Scoring Aggregator: overall score and tri-color band across validated sections.

use serde::{Deserialize, Serialize};

use super::ValidationResult;

const GREEN_THRESHOLD: u8 = 80;
const YELLOW_THRESHOLD: u8 = 60;

/// Per-section results; `None` for sections that were not validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub summary: Option<ValidationResult>,
    pub experience: Option<ValidationResult>,
    pub skills: Option<ValidationResult>,
}

impl SectionScores {
    pub fn present(&self) -> impl Iterator<Item = &ValidationResult> {
        [&self.summary, &self.experience, &self.skills]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Green,
    Yellow,
    Red,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        if score >= GREEN_THRESHOLD {
            ScoreBand::Green
        } else if score >= YELLOW_THRESHOLD {
            ScoreBand::Yellow
        } else {
            ScoreBand::Red
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallReport {
    pub overall_score: u8,
    pub band: ScoreBand,
    /// False when nothing was validated.
    pub all_passed: bool,
    pub sections_evaluated: usize,
}

impl OverallReport {
    /// Rounded mean of the present section scores. Absent sections are excluded
    /// from the average rather than counted as zero.
    pub fn from_scores(scores: &SectionScores) -> Self {
        let present: Vec<&ValidationResult> = scores.present().collect();
        if present.is_empty() {
            return Self {
                overall_score: 0,
                band: ScoreBand::Red,
                all_passed: false,
                sections_evaluated: 0,
            };
        }

        let total: u32 = present.iter().map(|r| u32::from(r.score)).sum();
        let mean = (f64::from(total) / present.len() as f64).round() as u8;

        Self {
            overall_score: mean,
            band: ScoreBand::for_score(mean),
            all_passed: present.iter().all(|r| r.passed),
            sections_evaluated: present.len(),
        }
    }
}
