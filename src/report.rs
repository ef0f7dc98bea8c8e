//! Per-file report assembly and worst-first ranking

use crate::discovery::Language;
use crate::metrics::{FunctionRecord, LineCounts, count_lines, count_naming_violations, discover_functions};
use crate::parsing::ParsedFile;
use crate::profile::Profile;
use crate::score::{RawMetrics, ScoreBreakdown, ScoringConfig, score_file};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Language,
    pub functions: Vec<FunctionRecord>,
    pub total_lines: usize,
    pub comment_lines: usize,
    pub avg_function_length: f64,
    pub avg_function_complexity: f64,
    pub comment_coverage_ratio: f64,
    pub naming_violations: usize,
    pub legacy_index: f64,
    pub score: ScoreBreakdown,
}

impl FileReport {
    /// Aggregates the extracted measurements and scores them. The index is
    /// always computed from scratch here.
    #[must_use]
    pub fn new(
        path: PathBuf,
        language: Language,
        functions: Vec<FunctionRecord>,
        lines: LineCounts,
        naming_violations: usize,
        cfg: &ScoringConfig,
    ) -> Self {
        let (avg_function_length, avg_function_complexity) = averages(&functions);
        let comment_coverage_ratio = if lines.total_lines > 0 {
            lines.comment_lines as f64 / lines.total_lines as f64 * 100.0
        } else {
            0.0
        };
        let raw = RawMetrics {
            function_count: functions.len(),
            avg_function_length,
            avg_function_complexity,
            comment_coverage_ratio,
            naming_violations,
        };
        let score = score_file(&raw, cfg);
        Self {
            path,
            language,
            functions,
            total_lines: lines.total_lines,
            comment_lines: lines.comment_lines,
            avg_function_length,
            avg_function_complexity,
            comment_coverage_ratio,
            naming_violations,
            legacy_index: score.legacy_index,
            score,
        }
    }

    pub fn has_functions(&self) -> bool {
        !self.functions.is_empty()
    }
}

fn averages(functions: &[FunctionRecord]) -> (f64, f64) {
    if functions.is_empty() {
        return (0.0, 0.0);
    }
    let n = functions.len() as f64;
    let length: usize = functions.iter().map(|f| f.line_count).sum();
    let complexity: usize = functions.iter().map(|f| f.complexity).sum();
    (length as f64 / n, complexity as f64 / n)
}

/// Runs every extraction over a parsed file and scores the result.
#[must_use]
pub fn build_report(parsed: &ParsedFile, cfg: &ScoringConfig) -> FileReport {
    let profile = Profile::for_language(parsed.language);
    let root = parsed.tree.root_node();
    FileReport::new(
        parsed.path.clone(),
        parsed.language,
        discover_functions(root, &parsed.source, profile),
        count_lines(root, profile),
        count_naming_violations(root, &parsed.source),
        cfg,
    )
}

/// Orders reports by index, worst first. The sort is stable, so ties keep
/// their input order.
#[must_use]
pub fn rank_worst_first(reports: &[FileReport]) -> Vec<&FileReport> {
    let mut ranked: Vec<&FileReport> = reports.iter().collect();
    ranked.sort_by(|a, b| b.legacy_index.partial_cmp(&a.legacy_index).unwrap_or(Ordering::Equal));
    ranked
}
