use thiserror::Error;

#[derive(Error, Debug)]
pub enum RxNavError {
    #[error("invalid rxnav base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("rxnav request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("rxnav returned an unexpected payload: {0}")]
    Malformed(String),
}

impl RxNavError {
    /// Short label used when counting failures.
    pub fn reason(&self) -> &'static str {
        match self {
            RxNavError::InvalidBaseUrl(_) => "invalid_url",
            RxNavError::Request(e) if e.is_timeout() => "timeout",
            RxNavError::Request(e) if e.is_status() => "status",
            RxNavError::Request(_) => "transport",
            RxNavError::Malformed(_) => "malformed",
        }
    }
}
