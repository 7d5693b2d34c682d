use crate::api::{required, ApiError, RecipesResponse, SharedState};
use crate::pantry::{NewRecipe, RecipeRecord};
use axum::{
    extract::{Path, State},
    Json,
};
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Save body: `title` and `content` plus any extra fields, which are stored as given
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoveRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
}

pub async fn save_recipe(
    State(state): State<SharedState>,
    Json(request): Json<SaveRecipeRequest>,
) -> Result<Json<RecipesResponse>, ApiError> {
    let title = required(request.title, "title")?;
    let recipe = NewRecipe {
        title,
        content: request.content,
        extra: request.extra,
    };

    let recipes = state.pantry.lock().await.add(recipe)?;
    Ok(Json(RecipesResponse { recipes }))
}

pub async fn remove_recipe(
    State(state): State<SharedState>,
    Json(request): Json<RemoveRecipeRequest>,
) -> Result<Json<RecipesResponse>, ApiError> {
    let title = required(request.title, "title")?;

    let removal = state.pantry.lock().await.remove(&title)?;
    if !removal.matched() {
        debug!("No saved recipe titled '{}' to remove", title);
    }

    Ok(Json(RecipesResponse {
        recipes: removal.titles,
    }))
}

pub async fn list_recipes(State(state): State<SharedState>) -> Json<RecipesResponse> {
    let recipes = state.pantry.lock().await.list();
    Json(RecipesResponse { recipes })
}

pub async fn get_recipe(
    State(state): State<SharedState>,
    Path(title): Path<String>,
) -> Result<Json<RecipeRecord>, ApiError> {
    let pantry = state.pantry.lock().await;
    let record = pantry.get(&title)?.clone();
    Ok(Json(record))
}
