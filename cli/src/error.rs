//! Command failures and the text printed for them.

use std::path::PathBuf;

use questify::{ApiError, Operation, StorageError, session::SessionError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{op:?} failed: {source}")]
    Api {
        op: Operation,
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("not logged in; run `questify-cli login` first")]
    NotLoggedIn,
    #[error("no config directory found; pass --token-file or set QUESTIFY_TOKEN_FILE")]
    NoTokenPath,
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
    #[error("http client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl CliError {
    pub fn api(op: Operation) -> impl FnOnce(ApiError) -> Self {
        move |source| Self::Api { op, source }
    }

    /// Line printed to stderr. API failures use the same notices the web app
    /// shows; everything else uses the error's display text.
    pub fn notice(&self) -> String {
        match self {
            Self::Api { op, source } => source.notice(*op).unwrap_or_else(|| op.failure_message().to_owned()),
            Self::Session(SessionError::Storage(StorageError::Write(detail))) => {
                format!("could not save token: {detail}")
            }
            other => other.to_string(),
        }
    }
}
