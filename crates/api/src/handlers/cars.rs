//! Handler for the JSON car catalogue.

use axum::extract::Query;
use axum::Json;
use luxrent_core::catalogue::{self, Car};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::response::DataResponse;

/// Longest accepted search string, in characters.
const MAX_QUERY_LEN: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct CarQuery {
    /// Case-insensitive substring of the car name.
    pub q: Option<String>,
}

/// GET /api/v1/cars?q=
///
/// Lists the catalogue, optionally filtered by name. Requires a session.
pub async fn list_cars(
    AuthSession(_session): AuthSession,
    Query(params): Query<CarQuery>,
) -> AppResult<Json<DataResponse<Vec<Car>>>> {
    let query = params.q.unwrap_or_default();
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(AppError::BadRequest(format!(
            "Search query must be at most {MAX_QUERY_LEN} characters"
        )));
    }

    Ok(Json(DataResponse {
        data: catalogue::filter(&query),
    }))
}
