//! Per-file pipeline: read, parse, extract, score

use crate::discovery::{Language, SourceFile, find_source_files_with_ignore};
use crate::parsing::{ParseError, create_parser, parse_file, parse_source};
use crate::report::{FileReport, build_report, rank_worst_first};
use crate::score::ScoringConfig;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tree_sitter::Parser;

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Path does not exist: {}", .0.display())]
    MissingPath(PathBuf),
    #[error("Path is neither a file nor a directory: {}", .0.display())]
    NotFileOrDirectory(PathBuf),
    #[error("Unsupported language: {}", .0.display())]
    Unsupported(PathBuf),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AnalyzeError {
    /// Per-file errors skip the file; everything else stops the run.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingPath(_) | Self::NotFileOrDirectory(_))
    }
}

#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: AnalyzeError,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    /// In discovery order; see [`RunSummary::ranked`].
    pub reports: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
}

impl RunSummary {
    #[must_use]
    pub fn ranked(&self) -> Vec<&FileReport> {
        rank_worst_first(&self.reports)
    }
}

pub struct AnalyzeOptions<'a> {
    pub lang_filter: Option<Language>,
    pub ignore_prefixes: &'a [String],
    pub scoring: &'a ScoringConfig,
}

pub fn analyze_source(
    source: impl Into<String>,
    language: Language,
    path: &Path,
    cfg: &ScoringConfig,
) -> Result<FileReport, ParseError> {
    let mut parser = create_parser(language)?;
    let parsed = parse_source(&mut parser, source.into(), language, path)?;
    Ok(build_report(&parsed, cfg))
}

pub fn analyze_file(parser: &mut Parser, file: &SourceFile, cfg: &ScoringConfig) -> Result<FileReport, ParseError> {
    let parsed = parse_file(parser, file)?;
    Ok(build_report(&parsed, cfg))
}

/// Analyzes files in parallel. Reports come back in input order; files that
/// fail to read or parse are logged and listed as skipped.
pub fn analyze_files(files: &[SourceFile], cfg: &ScoringConfig) -> RunSummary {
    let results: Vec<_> = files
        .par_iter()
        .map_init(Parser::new, |parser, file| analyze_file(parser, file, cfg))
        .collect();

    let mut summary = RunSummary::default();
    for (file, result) in files.iter().zip(results) {
        match result {
            Ok(report) => summary.reports.push(report),
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", file.path.display(), e);
                summary.skipped.push(SkippedFile { path: file.path.clone(), error: e.into() });
            }
        }
    }
    summary
}

/// Resolves the input path into source files. A single file with an unknown
/// extension is returned as skipped rather than as an error.
pub fn gather_files(
    root: &Path,
    lang_filter: Option<Language>,
    ignore_prefixes: &[String],
) -> Result<(Vec<SourceFile>, Vec<SkippedFile>), AnalyzeError> {
    if !root.exists() {
        return Err(AnalyzeError::MissingPath(root.to_path_buf()));
    }
    let (files, skipped) = if root.is_dir() {
        (find_source_files_with_ignore(root, ignore_prefixes), Vec::new())
    } else if root.is_file() {
        match SourceFile::from_path(root) {
            Some(file) => (vec![file], Vec::new()),
            None => {
                tracing::debug!("Skipping unsupported file {}", root.display());
                let error = AnalyzeError::Unsupported(root.to_path_buf());
                (Vec::new(), vec![SkippedFile { path: root.to_path_buf(), error }])
            }
        }
    } else {
        return Err(AnalyzeError::NotFileOrDirectory(root.to_path_buf()));
    };
    let files = files
        .into_iter()
        .filter(|f| lang_filter.is_none_or(|lang| f.language == lang))
        .collect();
    Ok((files, skipped))
}

pub fn run_analysis(root: &Path, opts: &AnalyzeOptions<'_>) -> Result<RunSummary, AnalyzeError> {
    let t0 = Instant::now();
    let (files, mut skipped) = gather_files(root, opts.lang_filter, opts.ignore_prefixes)?;
    let t1 = Instant::now();
    let mut summary = analyze_files(&files, opts.scoring);
    skipped.append(&mut summary.skipped);
    summary.skipped = skipped;
    tracing::info!(
        analyzed = summary.reports.len(),
        skipped = summary.skipped.len(),
        discovery_secs = t1.duration_since(t0).as_secs_f64(),
        analysis_secs = t1.elapsed().as_secs_f64(),
        "analysis complete"
    );
    Ok(summary)
}
