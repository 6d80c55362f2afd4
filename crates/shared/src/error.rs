use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Unexpected response format: {0}")]
    Format(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("State file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
