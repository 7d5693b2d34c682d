use crate::api::{present, ApiError, SharedState};
use crate::generator::{RecipeDraft, TitleSource};
use axum::{extract::State, Json};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateTitlesRequest {
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTitlesResponse {
    pub titles: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
}

pub async fn generate_titles(
    State(state): State<SharedState>,
    Json(request): Json<GenerateTitlesRequest>,
) -> Result<Json<GenerateTitlesResponse>, ApiError> {
    let ingredients = present(request.ingredients, "ingredients")?;

    let batch = state
        .generator
        .generate_titles(&ingredients, request.preferences.as_deref())
        .await;
    if let TitleSource::Degraded(reason) = &batch.source {
        debug!("Serving fallback titles: {}", reason);
    }

    Ok(Json(GenerateTitlesResponse {
        titles: batch.titles.to_vec(),
    }))
}

pub async fn generate_recipe(
    State(state): State<SharedState>,
    Json(request): Json<GenerateRecipeRequest>,
) -> Result<Json<RecipeDraft>, ApiError> {
    let title = present(request.title, "title")?;
    let ingredients = present(request.ingredients, "ingredients")?;

    let outcome = state
        .generator
        .generate_full_recipe(&title, &ingredients, request.preferences.as_deref())
        .await;

    Ok(Json(outcome.into_draft()))
}
