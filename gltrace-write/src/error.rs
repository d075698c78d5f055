use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to generate function \"{name}\"")]
    FailedToGenerateFunction {
        name: String,
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },
    #[error("Failed to generate {table} table")]
    FailedToGenerateTable {
        table: &'static str,
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },
    #[error("String formatting error while generating")]
    FormatError(#[from] std::fmt::Error),
    #[error("Failed to write \"{}\"", path.display())]
    FailedToWriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
