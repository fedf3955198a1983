use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;

use crate::models::{EventFilter, EventPatch, NewEvent};
use crate::registry::AppRegistry;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn list_events(State(registry): State<AppRegistry>) -> Result<Response, AppError> {
    let events = registry.events().list(EventFilter::default()).await?;
    Ok(success(events, "Events fetched successfully").into_response())
}

pub async fn create_event(
    State(registry): State<AppRegistry>,
    Json(new): Json<NewEvent>,
) -> Result<Response, AppError> {
    if new.capacity <= 0 {
        return Err(AppError::Validation(
            "capacity must be a positive number".to_string(),
        ));
    }
    if new.price < Decimal::ZERO {
        return Err(AppError::Validation("price cannot be negative".to_string()));
    }

    let event = registry.events().create(new).await?;
    Ok(created(event, "Event created successfully").into_response())
}

pub async fn update_event(
    State(registry): State<AppRegistry>,
    Path(id): Path<i64>,
    Json(patch): Json<EventPatch>,
) -> Result<Response, AppError> {
    if matches!(patch.capacity, Some(c) if c <= 0) {
        return Err(AppError::Validation(
            "capacity must be a positive number".to_string(),
        ));
    }
    if matches!(patch.price, Some(p) if p < Decimal::ZERO) {
        return Err(AppError::Validation("price cannot be negative".to_string()));
    }

    let event = registry.events().update(id, patch).await?;
    Ok(success(event, "Event updated successfully").into_response())
}

pub async fn delete_event(
    State(registry): State<AppRegistry>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    registry.events().delete(id).await?;
    Ok(empty_success("Event deleted successfully").into_response())
}
