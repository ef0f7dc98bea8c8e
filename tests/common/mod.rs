#![allow(dead_code)]

use codewisdom::{FileReport, FunctionName, Language, ScoringConfig, analyze_source};
use std::path::Path;

pub fn analyze(language: Language, code: &str) -> FileReport {
    let path = format!("snippet.{}", extension(language));
    analyze_source(code, language, Path::new(&path), &ScoringConfig::default())
        .expect("snippet should parse")
}

pub fn names(report: &FileReport) -> Vec<String> {
    report.functions.iter().map(|f| f.name.to_string()).collect()
}

pub fn complexity_of(report: &FileReport, name: &str) -> usize {
    report
        .functions
        .iter()
        .find(|f| f.name == FunctionName::Named(name.to_string()))
        .unwrap_or_else(|| panic!("function {name} not found in {:?}", names(report)))
        .complexity
}

fn extension(language: Language) -> &'static str {
    match language {
        Language::C => "c",
        Language::Cpp => "cpp",
        Language::Python => "py",
        Language::Java => "java",
        Language::Rust => "rs",
        Language::Go => "go",
        Language::JavaScript => "js",
        Language::TypeScript => "ts",
    }
}
