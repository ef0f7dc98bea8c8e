//! codewisdom - Legacy Code Index scoring for C, C++, Python, Java, Rust, Go,
//! JavaScript and TypeScript

pub mod analyze;
pub mod cli_output;
pub mod config;
pub mod defaults;
pub mod discovery;
pub mod metrics;
pub mod parsing;
pub mod profile;
pub mod report;
pub mod score;

#[cfg(test)]
mod test_utils;

// Re-export main types and functions for easy access
pub use analyze::{
    AnalyzeError, AnalyzeOptions, RunSummary, SkippedFile, analyze_file, analyze_files, analyze_source,
    gather_files, run_analysis,
};
pub use config::{Config, ConfigError, ReportConfig};
pub use defaults::default_config_toml;
pub use discovery::{Language, SourceFile, find_source_files, find_source_files_with_ignore};
pub use metrics::{FunctionRecord, LineCounts, compute_complexity, count_lines, count_naming_violations, discover_functions};
pub use parsing::{ParseError, ParsedFile, create_parser, parse_file, parse_source};
pub use profile::{FunctionName, Profile};
pub use report::{FileReport, build_report, rank_worst_first};
pub use score::{RawMetrics, ScoreBreakdown, ScorePolicy, ScoringConfig, score_file};
