use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a provider port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{resource} already exists")]
    AlreadyExists { resource: String },
    #[error("{resource} is not usable yet: {message}")]
    NotReady { resource: String, message: String },
    #[error("{operation} failed: {message}")]
    Rejected { operation: String, message: String },
    #[error("{operation} response is missing {field}")]
    MissingField {
        operation: String,
        field: &'static str,
    },
}

impl ProviderError {
    pub fn rejected(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(operation: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            operation: operation.into(),
            field,
        }
    }
}

#[derive(Debug, Error)]
pub enum PackagingError {
    #[error("failed to read function source '{}': {source}", path.display())]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("function source '{}' has no usable file name", path.display())]
    EntryName { path: PathBuf },
    #[error("failed to build function archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("failed to write function archive: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ReadinessError<E> {
    #[error("{resource} not ready after {attempts} attempts")]
    TimedOut { resource: String, attempts: u32 },
    #[error(transparent)]
    Check(E),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize output document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write output document '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Why a single provisioning step gave up.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Packaging(#[from] PackagingError),
    #[error("{resource} not ready after {attempts} attempts")]
    ReadinessTimeout { resource: String, attempts: u32 },
}

impl From<ReadinessError<ProviderError>> for ProvisionError {
    fn from(error: ReadinessError<ProviderError>) -> Self {
        match error {
            ReadinessError::TimedOut { resource, attempts } => {
                Self::ReadinessTimeout { resource, attempts }
            }
            ReadinessError::Check(error) => Self::Provider(error),
        }
    }
}
