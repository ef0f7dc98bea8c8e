use crate::discovery::{Language, SourceFile};
use std::path::{Path, PathBuf};
use tree_sitter::{Parser, Tree};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load {0} grammar")]
    Language(Language),
    #[error("Failed to parse {0} code")]
    Failed(Language),
    #[error("Syntax error in {}", path.display())]
    Syntax { path: PathBuf },
}

pub struct ParsedFile {
    pub path: PathBuf,
    pub language: Language,
    pub source: String,
    pub tree: Tree,
}

fn grammar(language: Language) -> tree_sitter::Language {
    match language {
        Language::C => tree_sitter_c::LANGUAGE.into(),
        Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        Language::Python => tree_sitter_python::LANGUAGE.into(),
        Language::Java => tree_sitter_java::LANGUAGE.into(),
        Language::Rust => tree_sitter_rust::LANGUAGE.into(),
        Language::Go => tree_sitter_go::LANGUAGE.into(),
        Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
    }
}

pub fn create_parser(language: Language) -> Result<Parser, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar(language))
        .map_err(|_| ParseError::Language(language))?;
    Ok(parser)
}

/// Parse already-loaded source. Trees containing a syntax error anywhere are rejected.
pub fn parse_source(
    parser: &mut Parser,
    source: String,
    language: Language,
    path: &Path,
) -> Result<ParsedFile, ParseError> {
    parser
        .set_language(&grammar(language))
        .map_err(|_| ParseError::Language(language))?;
    let tree = parser.parse(&source, None).ok_or(ParseError::Failed(language))?;
    if tree.root_node().has_error() {
        return Err(ParseError::Syntax { path: path.to_path_buf() });
    }
    Ok(ParsedFile { path: path.to_path_buf(), language, source, tree })
}

pub fn parse_file(parser: &mut Parser, file: &SourceFile) -> Result<ParsedFile, ParseError> {
    let source = std::fs::read_to_string(&file.path)?;
    parse_source(parser, source, file.language, &file.path)
}
