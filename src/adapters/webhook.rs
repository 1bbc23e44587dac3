use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        services::ingestor::IngestOutcome,
    },
    axum::{
        Json,
        body::Bytes,
        extract::State,
        http::{HeaderMap, StatusCode},
    },
};

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(event_id = tracing::field::Empty, event_type = tracing::field::Empty)
)]
pub async fn wh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let outcome = state.ingestor.ingest(&headers, &body).await?;

    let status = match outcome {
        IngestOutcome::Unauthenticated => StatusCode::UNAUTHORIZED,
        IngestOutcome::Persisted(_) | IngestOutcome::Duplicate | IngestOutcome::Ignored => {
            StatusCode::OK
        }
    };

    Ok((status, Json(serde_json::json!({"status": outcome.as_str()}))))
}
