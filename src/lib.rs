//! Recipe ideas from whatever is in the fridge.
//!
//! The [`generator`] asks a hosted language model for five recipe titles and
//! then a full recipe for the chosen one; the [`pantry`] keeps the recipes a
//! user decides to save. [`api`] exposes both over HTTP.
//!
//! ```no_run
//! use pantry_chef::{AppConfig, Pantry, ProviderFactory, RecipeGenerator};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let generator = RecipeGenerator::new(ProviderFactory::build_from_config(&config)?);
//! let mut pantry = Pantry::from_config(&config.pantry);
//!
//! let batch = generator.generate_titles("chicken, rice, lemon", None).await;
//! let draft = generator
//!     .generate_full_recipe(&batch.titles[0], "chicken, rice, lemon", None)
//!     .await
//!     .into_draft();
//! pantry.add(pantry_chef::NewRecipe::new(draft.title, draft.content))?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod pantry;
pub mod providers;

pub use config::{AppConfig, PantryConfig, ProviderConfig, RetryConfig, StorageKind};
pub use error::{ChefError, PantryError, ProviderError};
pub use generator::{
    GenerationFailure, RecipeDraft, RecipeGenerator, RecipeOutcome, TitleBatch, TitleSource,
};
pub use pantry::{NewRecipe, Pantry, RecipeRecord, Removal};
pub use providers::{CompletionProvider, ProviderFactory, RetryPolicy, ScriptedProvider};
