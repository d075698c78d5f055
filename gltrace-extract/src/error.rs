use std::path::PathBuf;

use gltrace_util::Trace;
use ustr::Ustr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read \"{}\"", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Line {line} of the function list is blank")]
    BlankWrapListLine { line: usize, source: Trace },
    #[error("\"{name}\" on line {line} of the function list is not a valid function name")]
    InvalidFunctionName { line: usize, name: String },
    #[error("Could not parse declaration on line {line}")]
    FailedToParseDeclaration {
        line: usize,
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },
    #[error("Function \"{0}\" is declared more than once")]
    DuplicateDeclaration(Ustr),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected character '{ch}' at column {column}")]
    UnexpectedCharacter { ch: char, column: usize },
    #[error("Declaration does not start with the linkage marker \"{0}\"")]
    MissingLinkageMarker(String),
    #[error("Malformed declaration \"{declaration}\": {reason}")]
    MalformedDeclaration {
        declaration: String,
        reason: &'static str,
    },
}
