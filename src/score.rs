//! Legacy Code Index scoring
//!
//! Raw metrics become 0-100 sub-scores (higher is better), are combined by
//! weight into a quality score, and the index is `100 - quality` (higher is
//! worse). Files without analyzable functions, such as headers and interface
//! files, are scored on comments and naming alone.

use crate::defaults;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringConfig {
    pub complexity_weight: f64,
    pub length_weight: f64,
    pub comment_weight: f64,
    pub naming_weight: f64,
    pub header_comment_weight: f64,
    pub header_naming_weight: f64,
    /// Average complexity at which the complexity score reaches 0. A complexity of 1 is perfect.
    pub max_complexity: f64,
    pub ideal_function_length: f64,
    pub max_function_length: f64,
    /// Comment coverage percentage with a perfect score; 0% and twice this score 0.
    pub ideal_comment_ratio: f64,
    /// Header comment coverage percentage at which the comment score saturates.
    pub header_comment_target: f64,
    pub naming_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        use defaults::scoring as d;
        Self {
            complexity_weight: d::COMPLEXITY_WEIGHT,
            length_weight: d::LENGTH_WEIGHT,
            comment_weight: d::COMMENT_WEIGHT,
            naming_weight: d::NAMING_WEIGHT,
            header_comment_weight: d::HEADER_COMMENT_WEIGHT,
            header_naming_weight: d::HEADER_NAMING_WEIGHT,
            max_complexity: d::MAX_COMPLEXITY,
            ideal_function_length: d::IDEAL_FUNCTION_LENGTH,
            max_function_length: d::MAX_FUNCTION_LENGTH,
            ideal_comment_ratio: d::IDEAL_COMMENT_RATIO,
            header_comment_target: d::HEADER_COMMENT_TARGET,
            naming_penalty: d::NAMING_PENALTY,
        }
    }
}

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl ScoringConfig {
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let all = [
            ("complexity_weight", self.complexity_weight),
            ("length_weight", self.length_weight),
            ("comment_weight", self.comment_weight),
            ("naming_weight", self.naming_weight),
            ("header_comment_weight", self.header_comment_weight),
            ("header_naming_weight", self.header_naming_weight),
            ("max_complexity", self.max_complexity),
            ("ideal_function_length", self.ideal_function_length),
            ("max_function_length", self.max_function_length),
            ("ideal_comment_ratio", self.ideal_comment_ratio),
            ("header_comment_target", self.header_comment_target),
            ("naming_penalty", self.naming_penalty),
        ];
        if let Some((key, v)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{key} must be a finite number, got {v}"));
        }
        // the first six entries are the weights
        if let Some((key, w)) = all[..6].iter().find(|(_, w)| !(0.0..=1.0).contains(w)) {
            return Err(format!("{key} must be 0.0-1.0, got {w}"));
        }
        let source_sum = self.complexity_weight + self.length_weight + self.comment_weight + self.naming_weight;
        if (source_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("complexity, length, comment and naming weights must sum to 1.0, got {source_sum}"));
        }
        let header_sum = self.header_comment_weight + self.header_naming_weight;
        if (header_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("header comment and naming weights must sum to 1.0, got {header_sum}"));
        }
        if self.max_complexity <= 1.0 {
            return Err(format!("max_complexity must be greater than 1, got {}", self.max_complexity));
        }
        if self.max_function_length <= self.ideal_function_length {
            return Err(format!(
                "max_function_length ({}) must be greater than ideal_function_length ({})",
                self.max_function_length, self.ideal_function_length
            ));
        }
        if self.ideal_comment_ratio <= 0.0 || self.header_comment_target <= 0.0 {
            return Err("comment ratio targets must be positive".to_string());
        }
        if self.naming_penalty < 0.0 {
            return Err(format!("naming_penalty must not be negative, got {}", self.naming_penalty));
        }
        Ok(())
    }
}

/// Aggregated raw metrics of one file, the only input to scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMetrics {
    pub function_count: usize,
    pub avg_function_length: f64,
    pub avg_function_complexity: f64,
    /// Percentage, 0-100
    pub comment_coverage_ratio: f64,
    pub naming_violations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    NoFunctions,
    WithFunctions,
}

impl ScorePolicy {
    pub const fn select(raw: &RawMetrics) -> Self {
        if raw.function_count == 0 { Self::NoFunctions } else { Self::WithFunctions }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub policy: ScorePolicy,
    /// `None` under [`ScorePolicy::NoFunctions`]
    pub complexity_score: Option<f64>,
    pub length_score: Option<f64>,
    pub comment_score: f64,
    pub naming_score: f64,
    pub quality: f64,
    pub legacy_index: f64,
}

#[must_use]
pub fn score_file(raw: &RawMetrics, cfg: &ScoringConfig) -> ScoreBreakdown {
    let naming_score = naming_score(raw.naming_violations, cfg);
    match ScorePolicy::select(raw) {
        ScorePolicy::NoFunctions => {
            let comment_score = header_comment_score(raw.comment_coverage_ratio, cfg);
            let quality = comment_score * cfg.header_comment_weight + naming_score * cfg.header_naming_weight;
            ScoreBreakdown {
                policy: ScorePolicy::NoFunctions,
                complexity_score: None,
                length_score: None,
                comment_score,
                naming_score,
                quality,
                legacy_index: legacy_index(quality),
            }
        }
        ScorePolicy::WithFunctions => {
            let complexity_score = complexity_score(raw.avg_function_complexity, cfg);
            let length_score = length_score(raw.avg_function_length, cfg);
            let comment_score = comment_score(raw.comment_coverage_ratio, cfg);
            let quality = complexity_score * cfg.complexity_weight
                + length_score * cfg.length_weight
                + comment_score * cfg.comment_weight
                + naming_score * cfg.naming_weight;
            ScoreBreakdown {
                policy: ScorePolicy::WithFunctions,
                complexity_score: Some(complexity_score),
                length_score: Some(length_score),
                comment_score,
                naming_score,
                quality,
                legacy_index: legacy_index(quality),
            }
        }
    }
}

fn legacy_index(quality: f64) -> f64 {
    clamp_score(100.0 - quality)
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Linear decay from 100 at complexity 1 to 0 at `max_complexity`.
#[must_use]
pub fn complexity_score(avg_complexity: f64, cfg: &ScoringConfig) -> f64 {
    clamp_score(100.0 - (avg_complexity - 1.0) / (cfg.max_complexity - 1.0) * 100.0)
}

/// Linear decay from 100 at the ideal length to 0 at `max_function_length`.
#[must_use]
pub fn length_score(avg_length: f64, cfg: &ScoringConfig) -> f64 {
    let span = cfg.max_function_length - cfg.ideal_function_length;
    clamp_score(100.0 - (avg_length - cfg.ideal_function_length) / span * 100.0)
}

/// Symmetric peak at the ideal ratio: under- and over-commenting cost the same.
#[must_use]
pub fn comment_score(ratio: f64, cfg: &ScoringConfig) -> f64 {
    clamp_score(100.0 - (ratio - cfg.ideal_comment_ratio).abs() / cfg.ideal_comment_ratio * 100.0)
}

/// Linear ramp that saturates once coverage reaches the header target.
#[must_use]
pub fn header_comment_score(ratio: f64, cfg: &ScoringConfig) -> f64 {
    clamp_score(ratio / cfg.header_comment_target * 100.0)
}

#[must_use]
pub fn naming_score(violations: usize, cfg: &ScoringConfig) -> f64 {
    clamp_score(100.0 - violations as f64 * cfg.naming_penalty)
}
