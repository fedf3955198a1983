use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::design::model::{BORDER_RADIUS_MAX, BORDER_RADIUS_MIN, FONT_SIZE_MAX, FONT_SIZE_MIN};
use crate::models::NewTicketDesign;
use crate::registry::AppRegistry;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

pub async fn list_ticket_designs(
    State(registry): State<AppRegistry>,
) -> Result<Response, AppError> {
    let designs = registry.designs().list().await?;
    Ok(success(designs, "Ticket designs fetched successfully").into_response())
}

pub async fn create_ticket_design(
    State(registry): State<AppRegistry>,
    Json(new): Json<NewTicketDesign>,
) -> Result<Response, AppError> {
    // The editing core clamps these; wire payloads are rejected instead.
    if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&new.font_size) {
        return Err(AppError::Validation(format!(
            "fontSize must be between {FONT_SIZE_MIN} and {FONT_SIZE_MAX}"
        )));
    }
    if !(BORDER_RADIUS_MIN..=BORDER_RADIUS_MAX).contains(&new.border_radius) {
        return Err(AppError::Validation(format!(
            "borderRadius must be between {BORDER_RADIUS_MIN} and {BORDER_RADIUS_MAX}"
        )));
    }

    let design = registry.designs().create(new).await?;
    Ok(created(design, "Ticket design created successfully").into_response())
}
