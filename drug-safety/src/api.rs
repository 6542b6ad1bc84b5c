use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::engine::report::ReportEntry;

fn default_age() -> i64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DrugCheckRequest {
    pub drugs: Vec<String>,
    #[serde(default = "default_age")]
    pub age: i64,
}

impl DrugCheckRequest {
    /// Decodes a raw request body. Only a JSON object with a `drugs` list is accepted.
    #[instrument(skip_all)]
    pub fn from_bytes(bytes: Bytes) -> Result<DrugCheckRequest, DrugCheckError> {
        tracing::debug!(len = bytes.len(), "decoding new request");

        let payload = String::from_utf8(bytes.into()).map_err(|e| {
            tracing::error!("failed to decode body: {}", e);
            DrugCheckError::RequestDecodingError(String::from("invalid body encoding"))
        })?;

        Ok(serde_json::from_str::<DrugCheckRequest>(&payload)?)
    }

    pub fn validate(&self, max_drugs: usize) -> Result<(), DrugCheckError> {
        if self.drugs.len() > max_drugs {
            return Err(DrugCheckError::TooManyDrugs(max_drugs));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugCheckResponse {
    pub results: Vec<ReportEntry>,
}

/// Errors surfaced to the caller. RxNav failures never show up here: they only
/// degrade individual report entries.
#[derive(Error, Debug)]
pub enum DrugCheckError {
    #[error("failed to decode request: {0}")]
    RequestDecodingError(String),
    #[error("failed to parse request: {0}")]
    RequestParsingError(#[from] serde_json::Error),
    #[error("too many drugs in request, at most {0} are allowed")]
    TooManyDrugs(usize),
}

impl IntoResponse for DrugCheckError {
    fn into_response(self) -> Response {
        match self {
            DrugCheckError::RequestDecodingError(_)
            | DrugCheckError::RequestParsingError(_)
            | DrugCheckError::TooManyDrugs(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        }
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_defaults_to_thirty() {
        let request =
            DrugCheckRequest::from_bytes(Bytes::from_static(br#"{"drugs": ["aspirin"]}"#))
                .unwrap();

        assert_eq!(
            request,
            DrugCheckRequest {
                drugs: vec!["aspirin".to_string()],
                age: 30,
            }
        );
    }

    #[test]
    fn missing_drugs_is_a_parsing_error() {
        let err = DrugCheckRequest::from_bytes(Bytes::from_static(br#"{"age": 4}"#)).unwrap_err();
        assert!(matches!(err, DrugCheckError::RequestParsingError(_)));
    }

    #[test]
    fn drugs_must_be_strings() {
        let err = DrugCheckRequest::from_bytes(Bytes::from_static(br#"{"drugs": [1, 2]}"#))
            .unwrap_err();
        assert!(matches!(err, DrugCheckError::RequestParsingError(_)));
    }

    #[test]
    fn invalid_utf8_is_a_decoding_error() {
        let err = DrugCheckRequest::from_bytes(Bytes::from_static(&[0xff, 0xfe])).unwrap_err();
        assert!(matches!(err, DrugCheckError::RequestDecodingError(_)));
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let request = DrugCheckRequest {
            drugs: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            age: 30,
        };

        assert!(request.validate(3).is_ok());
        assert!(matches!(
            request.validate(2),
            Err(DrugCheckError::TooManyDrugs(2))
        ));
    }

    #[test]
    fn errors_are_bad_requests() {
        let response = DrugCheckError::TooManyDrugs(2).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
