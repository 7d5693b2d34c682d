//! HTTP surface.
//!
//! Generation endpoints answer 200 with a usable body for any ingredient
//! text, blank included; provider trouble shows up as degraded content. Pantry endpoints answer 4xx for bad
//! requests and unknown titles, 500 when the pantry cannot be written.

pub mod generate;
pub mod recipes;

use crate::error::PantryError;
use crate::generator::RecipeGenerator;
use crate::pantry::Pantry;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod paths {
    pub const ROOT: &str = "/";
    pub const TEST: &str = "/test";
    pub const GENERATE_TITLES: &str = "/api/generate-titles";
    pub const GENERATE_RECIPE: &str = "/api/generate-recipe";
    pub const SAVE_RECIPE: &str = "/api/save-recipe";
    pub const REMOVE_RECIPE: &str = "/api/remove-recipe";
    pub const RECIPES: &str = "/api/recipes";
    pub const RECIPE: &str = "/api/recipes/:title";
}

/// Services shared by every request, built once at startup.
///
/// Pantry writes are synchronous `std::fs` calls made while the lock is
/// held; the file is small, so a worker is blocked only briefly.
pub struct AppState {
    pub generator: RecipeGenerator,
    pub pantry: Mutex<Pantry>,
}

impl AppState {
    pub fn new(generator: RecipeGenerator, pantry: Pantry) -> Arc<Self> {
        Arc::new(AppState {
            generator,
            pantry: Mutex::new(pantry),
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Title list returned by every pantry endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipesResponse {
    pub recipes: Vec<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Error for a required body field that is absent or blank
    pub fn missing_field(field: &str) -> Self {
        ApiError::BadRequest(format!("'{}' is required", field))
    }
}

impl From<PantryError> for ApiError {
    fn from(e: PantryError) -> Self {
        match e {
            PantryError::NotFound(title) => {
                ApiError::NotFound(format!("Recipe not found: {}", title))
            }
            other => {
                error!("Pantry operation failed: {}", other);
                ApiError::Internal("Failed to update pantry".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Take a field that must be present; blank text is passed through.
pub(crate) fn present(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}

/// Take a required text field, rejecting absent or blank values.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::missing_field(field))
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Recipe Generator API is running".to_string(),
    })
}

async fn test_probe() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "API is working".to_string(),
    })
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route(paths::ROOT, get(root))
        .route(paths::TEST, get(test_probe))
        .route(paths::GENERATE_TITLES, post(generate::generate_titles))
        .route(paths::GENERATE_RECIPE, post(generate::generate_recipe))
        .route(paths::SAVE_RECIPE, post(recipes::save_recipe))
        .route(paths::REMOVE_RECIPE, post(recipes::remove_recipe))
        .route(paths::RECIPES, get(recipes::list_recipes))
        .route(paths::RECIPE, get(recipes::get_recipe))
        .with_state(state)
}
