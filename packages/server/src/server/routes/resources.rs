//! Resource listing with optional availability filtering.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::common::{ApiError, ApiResult, ResourceCategory};
use crate::domains::bookings::{Booking, Resource, ResourceData};
use crate::domains::scheduling::{is_available, TimeWindow};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct ResourcesQuery {
    pub category: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// List resources, optionally narrowed by category and by availability
/// for a requested window
///
/// `start` and `end` come as a pair; availability is evaluated with the same
/// rules the payment flow uses, so what this returns as free is exactly what
/// checkout would accept at this instant.
pub async fn list_resources_handler(
    State(state): State<AppState>,
    Query(query): Query<ResourcesQuery>,
) -> ApiResult<Json<Vec<ResourceData>>> {
    let deps = &state.deps;

    let resources = match query.category.as_deref() {
        Some(raw) => {
            let category = ResourceCategory::parse(raw).ok_or_else(|| {
                ApiError::Validation(format!("unknown resource category: {raw}"))
            })?;
            Resource::find_by_category(category, &deps.db_pool)
                .await
                .map_err(ApiError::store)?
        }
        None => Resource::find_all(&deps.db_pool)
            .await
            .map_err(ApiError::store)?,
    };

    let window = match (query.start, query.end) {
        (None, None) => None,
        (Some(start), Some(end)) => Some(
            TimeWindow::new(start, end).map_err(|e| ApiError::Validation(e.to_string()))?,
        ),
        _ => {
            return Err(ApiError::Validation(
                "start and end must be provided together".to_string(),
            ))
        }
    };

    let mut available = Vec::with_capacity(resources.len());
    for resource in resources {
        if let Some(window) = &window {
            let held: Vec<TimeWindow> = Booking::find_for_resource(&resource.id, &deps.db_pool)
                .await
                .map_err(ApiError::store)?
                .iter()
                .filter_map(Booking::window)
                .collect();

            if !is_available(resource.category(), &held, window, &deps.policy) {
                continue;
            }
        }
        available.push(ResourceData::from(resource));
    }

    Ok(Json(available))
}
