use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{HealthReport, Record};
use crate::store::SharedStore;

pub async fn health(State(store): State<SharedStore>) -> (StatusCode, Json<HealthReport>) {
    match store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthReport::new(true))),
        Err(e) => {
            warn!("Health check: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthReport::new(false)))
        }
    }
}

pub async fn list_records<R: Record>(State(store): State<SharedStore>) -> Result<Json<Vec<R>>, ApiError> {
    let documents = store.list(R::COLLECTION).await?;
    let records = documents
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<R>, _>>()?;
    Ok(Json(records))
}

pub async fn create_record<R: Record>(
    State(store): State<SharedStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    let Json(payload) = payload?;
    let record = R::from_payload(&payload, Uuid::new_v4(), Utc::now())?;
    let document = serde_json::to_value(&record)?;

    store.insert(R::COLLECTION, record.id(), document).await?;
    info!("Created {} {}", R::COLLECTION, record.id());
    Ok((StatusCode::CREATED, Json(record)))
}

/// Ids that are not UUIDs cannot name a stored record, so they are
/// reported the same way as a missing one.
pub async fn delete_record<R: Record>(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound(R::NOT_FOUND))?;
    if store.remove(R::COLLECTION, id).await? {
        info!("Deleted {} {id}", R::COLLECTION);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(R::NOT_FOUND))
    }
}

pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found")
}
