use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pantry_chef::api::{self, AppState};
use pantry_chef::{Pantry, PantryConfig, ProviderError, RecipeGenerator, ScriptedProvider, StorageKind};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app_with(provider: &ScriptedProvider, pantry: Pantry) -> Router {
    let generator = RecipeGenerator::new(Box::new(provider.clone()));
    api::router(AppState::new(generator, pantry))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn titles_of(body: &Value) -> Vec<String> {
    body["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_root_and_probe() {
    let app = app_with(&ScriptedProvider::new(), Pantry::in_memory());

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("running"));

    let (status, body) = send(&app, "GET", "/test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API is working");
}

/// Generate titles, pick one, generate the recipe, save it, list it, remove it.
#[tokio::test]
async fn test_full_recipe_flow() {
    let provider = ScriptedProvider::new();
    provider.push_ok(
        "1. Lemon Herb Chicken Rice Bowl\n2. Smoky Chipotle Chicken Tacos\n3. Coconut Curry Rice Skillet\n4. Greek Lemon Chicken Souvlaki\n5. Korean Gochujang Fried Rice",
    );
    provider.push_ok("[TITLE]\nLemon Herb Chicken Rice Bowl\nDESCRIPTION:\nBright and fresh.");
    let app = app_with(&provider, Pantry::in_memory());

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-titles",
        Some(json!({"ingredients": "chicken, rice, lemon"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles = body["titles"].as_array().unwrap();
    assert_eq!(titles.len(), 5);
    assert_eq!(titles[0], "Lemon Herb Chicken Rice Bowl");

    let (status, recipe) = send(
        &app,
        "POST",
        "/api/generate-recipe",
        Some(json!({
            "title": "Lemon Herb Chicken Rice Bowl",
            "ingredients": "chicken, rice, lemon",
            "preferences": "dairy free"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recipe["title"], "Lemon Herb Chicken Rice Bowl");
    assert!(!recipe["content"].as_str().unwrap().is_empty());
    assert!(provider.prompts()[1].contains("Preferences: dairy free"));

    let (status, body) = send(&app, "POST", "/api/save-recipe", Some(recipe)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles_of(&body), vec!["Lemon Herb Chicken Rice Bowl"]);

    let (_, body) = send(&app, "GET", "/api/recipes", None).await;
    assert_eq!(titles_of(&body), vec!["Lemon Herb Chicken Rice Bowl"]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/remove-recipe",
        Some(json!({"title": "Lemon Herb Chicken Rice Bowl"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(titles_of(&body).is_empty());
}

#[tokio::test]
async fn test_generate_titles_never_fails_on_provider_error() {
    let provider = ScriptedProvider::new();
    provider.push_err(ProviderError::RateLimitExhausted { attempts: 3 });
    let app = app_with(&provider, Pantry::in_memory());

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-titles",
        Some(json!({"ingredients": "chicken, rice"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let titles = body["titles"].as_array().unwrap();
    assert_eq!(titles.len(), 5);
    assert!(titles.iter().all(|t| t == "Quick Chicken Dish"));
}

#[tokio::test]
async fn test_generate_recipe_failure_is_error_record() {
    let provider = ScriptedProvider::new();
    provider.push_err(ProviderError::RateLimitExhausted { attempts: 3 });
    let app = app_with(&provider, Pantry::in_memory());

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-recipe",
        Some(json!({"title": "Soup", "ingredients": "leeks"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Error");
    assert!(body["content"].as_str().unwrap().starts_with("Rate limited"));
}

#[tokio::test]
async fn test_blank_ingredients_still_get_titles() {
    let app = app_with(&ScriptedProvider::new(), Pantry::in_memory());

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-titles",
        Some(json!({"ingredients": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let titles = body["titles"].as_array().unwrap();
    assert_eq!(titles.len(), 5);
    assert!(titles.iter().all(|t| t == "Quick Dish"));
}

#[tokio::test]
async fn test_blank_recipe_fields_are_passed_to_generator() {
    let provider = ScriptedProvider::new();
    provider.push_ok("DESCRIPTION:\nWhatever is on hand.");
    let app = app_with(&provider, Pantry::in_memory());

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-recipe",
        Some(json!({"title": "", "ingredients": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "DESCRIPTION:\nWhatever is on hand.");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_missing_fields_are_bad_requests() {
    let app = app_with(&ScriptedProvider::new(), Pantry::in_memory());

    let (status, body) = send(&app, "POST", "/api/remove-recipe", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("title"));

    let (status, _) = send(&app, "POST", "/api/generate-titles", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/generate-recipe",
        Some(json!({"ingredients": "eggs"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/save-recipe", Some(json!({"content": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_unknown_title_leaves_pantry_unchanged() {
    let app = app_with(&ScriptedProvider::new(), Pantry::in_memory());
    send(
        &app,
        "POST",
        "/api/save-recipe",
        Some(json!({"title": "Soup", "content": "hot"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/remove-recipe",
        Some(json!({"title": "Stew"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles_of(&body), vec!["Soup"]);
}

#[tokio::test]
async fn test_get_saved_recipe() {
    let app = app_with(&ScriptedProvider::new(), Pantry::in_memory());
    send(
        &app,
        "POST",
        "/api/save-recipe",
        Some(json!({"title": "Lemon Soup", "content": "hot", "servings": 4})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/recipes/Lemon%20Soup", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "hot");
    assert_eq!(body["servings"], 4);
    assert!(body["saved_date"].as_str().is_some());

    let (status, body) = send(&app, "GET", "/api/recipes/Stew", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Stew"));
}

#[tokio::test]
async fn test_file_pantry_persists_across_restarts() {
    let dir = TempDir::new().unwrap();
    let config = PantryConfig {
        storage: StorageKind::File,
        path: dir.path().join("grandmas_pantry.json"),
    };

    let app = app_with(&ScriptedProvider::new(), Pantry::from_config(&config));
    for title in ["Soup", "Bread"] {
        send(
            &app,
            "POST",
            "/api/save-recipe",
            Some(json!({"title": title, "content": ""})),
        )
        .await;
    }

    let restarted = app_with(&ScriptedProvider::new(), Pantry::from_config(&config));
    let (_, body) = send(&restarted, "GET", "/api/recipes", None).await;
    assert_eq!(titles_of(&body), vec!["Soup", "Bread"]);
}

#[tokio::test]
async fn test_corrupt_pantry_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let config = PantryConfig {
        storage: StorageKind::File,
        path: dir.path().join("grandmas_pantry.json"),
    };
    std::fs::write(&config.path, "not json at all").unwrap();

    let app = app_with(&ScriptedProvider::new(), Pantry::from_config(&config));
    let (status, body) = send(&app, "GET", "/api/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(titles_of(&body).is_empty());
}
