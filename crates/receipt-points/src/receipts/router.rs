use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{PointsView, Receipt, ReceiptId};
use super::repository::{ReceiptRepository, RepositoryError};
use super::service::{ReceiptService, ReceiptServiceError};

/// Router builder exposing the receipt processing and points lookup endpoints.
pub fn receipt_router<R>(service: Arc<ReceiptService<R>>) -> Router
where
    R: ReceiptRepository + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<R>))
        .route("/receipts/:id/points", get(points_handler::<R>))
        .with_state(service)
}

pub(crate) async fn process_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    axum::Json(receipt): axum::Json<Receipt>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    match service.process(receipt) {
        Ok(record) => (StatusCode::OK, axum::Json(record.id_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn points_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    match service.points(&ReceiptId(id)) {
        Ok(points) => (StatusCode::OK, axum::Json(PointsView { points })).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ReceiptServiceError) -> Response {
    let status = match &err {
        ReceiptServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
        ReceiptServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ReceiptServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ReceiptServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
