//! File discovery and traversal

use ignore::WalkBuilder;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Supported source file languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Python,
    Java,
    Rust,
    Go,
    JavaScript,
    TypeScript,
}

impl Language {
    pub const ALL: [Self; 8] = [
        Self::C,
        Self::Cpp,
        Self::Python,
        Self::Java,
        Self::Rust,
        Self::Go,
        Self::JavaScript,
        Self::TypeScript,
    ];

    /// Detect language from file extension. `.h` is read as C++.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "cpp" | "hpp" | "h" | "cc" | "cxx" => Some(Self::Cpp),
            "c" => Some(Self::C),
            "py" => Some(Self::Python),
            "java" => Some(Self::Java),
            "rs" => Some(Self::Rust),
            "go" => Some(Self::Go),
            "js" => Some(Self::JavaScript),
            "ts" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Parse a stable language identifier such as `cpp` or `typescript`
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.id() == id)
    }

    pub const fn id(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Python => "python",
            Self::Java => "java",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A discovered source file with its language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
}

impl SourceFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        Language::from_path(&path).map(|language| Self { path, language })
    }
}

/// Finds all supported source files under the given root directory.
/// Respects .gitignore rules automatically.
pub fn find_source_files(root: &Path) -> Vec<SourceFile> {
    find_source_files_with_ignore(root, &[])
}

/// Like [`find_source_files`], but drops any file whose path relative to `root`
/// starts with one of `ignore_prefixes`.
pub fn find_source_files_with_ignore(root: &Path, ignore_prefixes: &[String]) -> Vec<SourceFile> {
    WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| !is_ignored(entry.path(), root, ignore_prefixes))
        .filter_map(|entry| {
            let file = SourceFile::from_path(entry.path());
            if file.is_none() {
                tracing::debug!("Skipping unsupported file {}", entry.path().display());
            }
            file
        })
        .collect()
}

fn is_ignored(path: &Path, root: &Path, ignore_prefixes: &[String]) -> bool {
    if ignore_prefixes.is_empty() {
        return false;
    }
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel.to_string_lossy();
    ignore_prefixes
        .iter()
        .map(|p| p.trim_start_matches("./"))
        .filter(|p| !p.is_empty())
        .any(|prefix| rel.starts_with(prefix))
}
