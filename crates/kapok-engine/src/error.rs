//! Engine error types with source-aware formatting

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Names bound into every template render
pub const CONTEXT_NAMES: &[&str] = &["config", "chart", "services", "tls", "service"];

/// Main engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template syntax configuration: {0}")]
    Syntax(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Path of the file or directory that failed, for filesystem errors
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Error kind for categorizing template errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TemplateErrorKind {
    UndefinedVariable,
    UnknownFilter,
    SyntaxError,
    TypeError,
    Other,
}

/// Template-specific error with source information
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{template}: {message}")]
#[diagnostic(code(kapok::template::render))]
pub struct TemplateError {
    /// Catalog name of the failing template
    pub template: String,

    /// Error message
    pub message: String,

    /// Error kind for categorization
    pub kind: TemplateErrorKind,

    /// Template source code
    #[source_code]
    pub src: NamedSource<String>,

    /// Error location in source
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// Suggestion for fixing the error
    #[help]
    pub suggestion: Option<String>,
}

impl TemplateError {
    /// Create a new template error from a MiniJinja error
    pub fn from_minijinja(
        err: minijinja::Error,
        template_name: &str,
        template_source: &str,
    ) -> Self {
        let kind = categorize(&err);
        let span = err
            .line()
            .and_then(|line_num| calculate_span(template_source, line_num));

        let message = err
            .to_string()
            .replace("undefined value", "undefined variable")
            .replace("syntax error: ", "");

        Self {
            template: template_name.to_string(),
            message,
            kind,
            src: NamedSource::new(template_name, template_source.to_string()),
            span,
            suggestion: suggestion_for(kind),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> TemplateErrorKind {
        self.kind
    }
}

fn categorize(err: &minijinja::Error) -> TemplateErrorKind {
    match err.kind() {
        minijinja::ErrorKind::UndefinedError => TemplateErrorKind::UndefinedVariable,
        minijinja::ErrorKind::UnknownFilter => TemplateErrorKind::UnknownFilter,
        minijinja::ErrorKind::SyntaxError => TemplateErrorKind::SyntaxError,
        minijinja::ErrorKind::NonPrimitive | minijinja::ErrorKind::NonKey => {
            TemplateErrorKind::TypeError
        }
        _ => TemplateErrorKind::Other,
    }
}

fn suggestion_for(kind: TemplateErrorKind) -> Option<String> {
    match kind {
        TemplateErrorKind::UndefinedVariable => Some(format!(
            "Kapok templates can only reference: {}",
            CONTEXT_NAMES.join(", ")
        )),
        TemplateErrorKind::UnknownFilter => {
            Some("Available filters: toyaml, nindent, quote and the MiniJinja builtins".to_string())
        }
        TemplateErrorKind::SyntaxError => Some(
            "Kapok expressions use [[ ]] and [% %]; {{ }} is left untouched for Helm".to_string(),
        ),
        _ => None,
    }
}

/// Calculate the source span for a given line number
fn calculate_span(source: &str, line_num: usize) -> Option<SourceSpan> {
    let mut offset = 0;

    for (idx, line) in source.lines().enumerate() {
        if idx + 1 == line_num {
            return Some(SourceSpan::new(offset.into(), line.len()));
        }
        offset += line.len() + 1;
    }

    None
}
