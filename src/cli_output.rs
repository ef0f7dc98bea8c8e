//! CLI output formatting functions

use crate::config::ReportConfig;
use crate::discovery::Language;
use crate::report::FileReport;
use console::Style;
use std::fmt::{self, Write};
use std::path::Path;

const HEAVY_RULE: &str = "======================================================";
const LIGHT_RULE: &str = "------------------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Terminal styles for the text report. With color off every style is plain.
struct Palette {
    color: bool,
}

impl Palette {
    fn style(&self) -> Style {
        if self.color { Style::new() } else { Style::new().force_styling(false) }
    }

    fn white(&self) -> Style {
        self.style().white()
    }

    fn cyan(&self) -> Style {
        self.style().cyan()
    }

    fn yellow(&self) -> Style {
        self.style().yellow()
    }

    fn index(&self, value: f64, cfg: &ReportConfig) -> Style {
        if value > cfg.critical_index {
            self.style().red()
        } else if value > cfg.warn_index {
            self.style().yellow()
        } else {
            self.style().green()
        }
    }
}

pub fn print_no_files_message(lang_filter: Option<Language>, root: &Path) {
    match lang_filter {
        Some(lang) => println!("No {lang} files in {}", root.display()),
        None => println!("No supported source files in {}", root.display()),
    }
}

/// Renders the ranked reports as the text block listing, worst first.
pub fn render_text(ranked: &[&FileReport], cfg: &ReportConfig, color: bool) -> Result<String, fmt::Error> {
    let palette = Palette { color };
    let mut out = String::new();
    writeln!(
        out,
        "{}\n",
        palette.white().apply_to("=============== PROJECT ANALYSIS RANKING (WORST FILES FIRST) ===============")
    )?;
    for report in ranked {
        write_file(&mut out, report, cfg, &palette)?;
    }
    Ok(out)
}

fn write_file(out: &mut String, r: &FileReport, cfg: &ReportConfig, p: &Palette) -> fmt::Result {
    let yellow = p.yellow();
    writeln!(out, "{}", p.white().apply_to(HEAVY_RULE))?;
    writeln!(out, "  Analysis Report for: {}", p.cyan().apply_to(r.path.display()))?;
    writeln!(
        out,
        "  Legacy Code Index:         {} (Higher is worse)",
        p.index(r.legacy_index, cfg).apply_to(format!("{:.2}", r.legacy_index))
    )?;
    writeln!(out, "{}", p.white().apply_to(LIGHT_RULE))?;

    if r.has_functions() {
        writeln!(
            out,
            "  Avg Function Length:       {} lines\n  Avg Cyclomatic Complexity: {}",
            yellow.apply_to(format!("{:.2}", r.avg_function_length)),
            yellow.apply_to(format!("{:.2}", r.avg_function_complexity))
        )?;
    } else {
        writeln!(out, "  (No analyzable functions found in this file)")?;
    }
    writeln!(
        out,
        "  Comment Coverage:          {} ({}/{} lines)\n  Naming Violations:         {} found",
        yellow.apply_to(format!("{:.2}%", r.comment_coverage_ratio)),
        r.comment_lines,
        r.total_lines,
        yellow.apply_to(r.naming_violations)
    )?;

    if r.has_functions() && cfg.show_functions {
        writeln!(out, "{}\nFound {} functions:\n", p.white().apply_to(LIGHT_RULE), r.functions.len())?;
        for f in &r.functions {
            writeln!(
                out,
                "  - Function: {}\n    - Length: {}, Complexity: {}",
                yellow.apply_to(&f.name),
                f.line_count,
                f.complexity
            )?;
        }
    }
    out.write_str("\n\n")
}

pub fn render_json(ranked: &[&FileReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(ranked)
}

/// Keeps the `top` worst entries of an already ranked list.
#[must_use]
pub fn take_top<'a>(mut ranked: Vec<&'a FileReport>, top: Option<usize>) -> Vec<&'a FileReport> {
    if let Some(n) = top {
        ranked.truncate(n);
    }
    ranked
}
