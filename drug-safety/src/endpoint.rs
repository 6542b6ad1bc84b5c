use axum::extract::State;
use axum::Json;
use bytes::Bytes;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::{DrugCheckError, DrugCheckRequest, DrugCheckResponse};
use crate::metrics_consts::{CHECKED_DRUGS_COUNTER, CHECK_REQUESTS_COUNTER};
use crate::router;

/// Drug check endpoint. Always answers 200 with a best-effort report once the body is
/// valid; only malformed or oversized requests are rejected.
pub async fn check(
    State(state): State<router::State>,
    body: Bytes,
) -> Result<Json<DrugCheckResponse>, DrugCheckError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("drug_check", %request_id);

    async move {
        let request = DrugCheckRequest::from_bytes(body)?;
        request.validate(state.max_drugs_per_request)?;

        metrics::counter!(CHECK_REQUESTS_COUNTER).increment(1);
        metrics::counter!(CHECKED_DRUGS_COUNTER).increment(request.drugs.len() as u64);

        let results = state.engine.check(&request.drugs, request.age).await;

        tracing::info!(
            drugs = request.drugs.len(),
            age = request.age,
            "drug check complete"
        );
        Ok(Json(DrugCheckResponse { results }))
    }
    .instrument(span)
    .await
}
