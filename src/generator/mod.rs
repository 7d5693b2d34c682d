//! Recipe title and full-recipe generation.
//!
//! Every call is request-scoped: build a prompt, ask the provider, normalize
//! the text. Provider failures never escape as errors; they come back as
//! degraded outcomes so callers always have something to show.

mod prompt;
mod titles;

pub use prompt::{build_recipe_prompt, build_titles_prompt, RECIPE_LAYOUT};
pub use titles::{
    fallback_title, fill_titles, main_ingredient, parse_titles, quick_title, FALLBACK_STYLES,
    TITLE_COUNT,
};

use crate::error::ProviderError;
use crate::providers::CompletionProvider;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a generation call fell back to a degraded result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    /// Provider kept throttling through the whole retry budget
    RateLimited { attempts: u32 },
    /// Any other provider failure, including empty or malformed responses
    Provider(String),
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationFailure::RateLimited { attempts } => write!(
                f,
                "Rate limited by provider after {} attempts, please try again later",
                attempts
            ),
            GenerationFailure::Provider(message) => f.write_str(message),
        }
    }
}

impl From<ProviderError> for GenerationFailure {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::RateLimitExhausted { attempts } => {
                GenerationFailure::RateLimited { attempts }
            }
            // A throttled attempt that no retry policy wrapped
            ProviderError::RateLimited(_) => GenerationFailure::RateLimited { attempts: 1 },
            other => GenerationFailure::Provider(other.to_string()),
        }
    }
}

/// How a title batch was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSource {
    /// Provider supplied all five titles
    Provider,
    /// Provider supplied some titles; the rest are positional fallbacks
    Padded { fallbacks: usize },
    /// Provider failed; every title is the quick fallback
    Degraded(GenerationFailure),
}

/// Exactly [`TITLE_COUNT`] title candidates plus how they were obtained
#[derive(Debug, Clone)]
pub struct TitleBatch {
    pub titles: [String; TITLE_COUNT],
    pub source: TitleSource,
}

impl TitleBatch {
    pub fn is_degraded(&self) -> bool {
        matches!(self.source, TitleSource::Degraded(_))
    }
}

/// Title plus free-form recipe text, as returned to callers and saved to the pantry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub content: String,
}

/// Result of a full-recipe generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeOutcome {
    Generated(RecipeDraft),
    Failed(GenerationFailure),
}

impl RecipeOutcome {
    /// Title used for the placeholder draft of a failed generation
    pub const ERROR_TITLE: &'static str = "Error";

    /// Flatten into a draft; failures become `{title: "Error", content: <message>}`.
    pub fn into_draft(self) -> RecipeDraft {
        match self {
            RecipeOutcome::Generated(draft) => draft,
            RecipeOutcome::Failed(failure) => RecipeDraft {
                title: Self::ERROR_TITLE.to_string(),
                content: failure.to_string(),
            },
        }
    }
}

/// Generation service over an injected completion provider
pub struct RecipeGenerator {
    provider: Box<dyn CompletionProvider>,
}

impl RecipeGenerator {
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        RecipeGenerator { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Ask the provider, treating blank completions as malformed.
    async fn ask(&self, prompt: &str) -> Result<String, ProviderError> {
        let text = self.provider.complete(prompt).await?;
        if text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(
                "provider returned an empty completion".to_string(),
            ));
        }
        Ok(text)
    }

    /// Produce exactly five recipe titles for the ingredients.
    pub async fn generate_titles(&self, ingredients: &str, preferences: Option<&str>) -> TitleBatch {
        let prompt = build_titles_prompt(ingredients, preferences);

        let raw = match self.ask(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Error generating titles: {}", e);
                let quick = quick_title(&main_ingredient(ingredients));
                return TitleBatch {
                    titles: std::array::from_fn(|_| quick.clone()),
                    source: TitleSource::Degraded(e.into()),
                };
            }
        };

        let (titles, fallbacks) = fill_titles(parse_titles(&raw), ingredients);
        let source = if fallbacks == 0 {
            TitleSource::Provider
        } else {
            info!("Provider returned too few titles, padded {} fallbacks", fallbacks);
            TitleSource::Padded { fallbacks }
        };

        TitleBatch { titles, source }
    }

    /// Produce the full recipe text for a selected title.
    ///
    /// The completion is returned verbatim; section layout is requested from
    /// the provider but never validated here.
    pub async fn generate_full_recipe(
        &self,
        title: &str,
        ingredients: &str,
        preferences: Option<&str>,
    ) -> RecipeOutcome {
        let prompt = build_recipe_prompt(title, ingredients, preferences);

        match self.ask(&prompt).await {
            Ok(content) => {
                info!("Generated recipe for '{}'", title);
                RecipeOutcome::Generated(RecipeDraft {
                    title: title.to_string(),
                    content,
                })
            }
            Err(e) => {
                warn!("Error generating recipe '{}': {}", title, e);
                RecipeOutcome::Failed(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ScriptedProvider;

    fn generator_with(provider: &ScriptedProvider) -> RecipeGenerator {
        RecipeGenerator::new(Box::new(provider.clone()))
    }

    #[tokio::test]
    async fn test_generate_titles_from_provider() {
        let provider = ScriptedProvider::new();
        provider.push_ok(
            "1. Lemon Herb Chicken Rice Bowl\n2. Smoky Chipotle Chicken Tacos\n3. Coconut Curry Rice Skillet\n4. Greek Lemon Chicken Souvlaki\n5. Korean Gochujang Fried Rice",
        );
        let generator = generator_with(&provider);

        let batch = generator
            .generate_titles("chicken, rice, lemon", Some("quick weeknight"))
            .await;

        assert_eq!(batch.source, TitleSource::Provider);
        assert_eq!(batch.titles[0], "Lemon Herb Chicken Rice Bowl");
        assert_eq!(batch.titles[4], "Korean Gochujang Fried Rice");
        assert!(provider.prompts()[0].contains("quick weeknight"));
    }

    #[tokio::test]
    async fn test_generate_titles_pads_short_response() {
        let provider = ScriptedProvider::new();
        provider.push_ok("1. Lemon Rice\n2. Lemon Rice\n3. Chicken Pilaf");
        let generator = generator_with(&provider);

        let batch = generator.generate_titles("chicken, rice", None).await;

        assert_eq!(batch.source, TitleSource::Padded { fallbacks: 3 });
        assert_eq!(
            batch.titles,
            [
                "Lemon Rice",
                "Chicken Pilaf",
                "Sautéed Chicken Special",
                "Roasted Chicken Special",
                "Stir-Fried Chicken Special",
            ]
        );
    }

    #[tokio::test]
    async fn test_generate_titles_degrades_on_failure() {
        let provider = ScriptedProvider::new();
        provider.push_err(ProviderError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        let generator = generator_with(&provider);

        let batch = generator.generate_titles("salmon, dill", None).await;

        assert!(batch.is_degraded());
        assert!(batch.titles.iter().all(|t| t == "Quick Salmon Dish"));
    }

    #[tokio::test]
    async fn test_generate_titles_empty_completion_degrades() {
        let provider = ScriptedProvider::always("   \n");
        let generator = generator_with(&provider);

        let batch = generator.generate_titles("tofu", None).await;
        assert!(batch.is_degraded());
        assert_eq!(batch.titles[0], "Quick Tofu Dish");
    }

    #[tokio::test]
    async fn test_generate_titles_reports_rate_limit() {
        let provider = ScriptedProvider::new();
        provider.push_err(ProviderError::RateLimitExhausted { attempts: 3 });
        let generator = generator_with(&provider);

        let batch = generator.generate_titles("tofu", None).await;
        assert_eq!(
            batch.source,
            TitleSource::Degraded(GenerationFailure::RateLimited { attempts: 3 })
        );
    }

    #[tokio::test]
    async fn test_generate_full_recipe_returns_text_verbatim() {
        let text = "[TITLE]\nLemon Herb Chicken Rice Bowl\nDESCRIPTION:\nBright and fresh.";
        let provider = ScriptedProvider::always(text);
        let generator = generator_with(&provider);

        let outcome = generator
            .generate_full_recipe("Lemon Herb Chicken Rice Bowl", "chicken, rice, lemon", None)
            .await;

        assert_eq!(
            outcome.into_draft(),
            RecipeDraft {
                title: "Lemon Herb Chicken Rice Bowl".to_string(),
                content: text.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_generate_full_recipe_failure_becomes_error_draft() {
        let provider = ScriptedProvider::new();
        provider.push_err(ProviderError::NotConfigured("no key".to_string()));
        let generator = generator_with(&provider);

        let draft = generator
            .generate_full_recipe("Anything", "eggs", None)
            .await
            .into_draft();

        assert_eq!(draft.title, "Error");
        assert!(draft.content.contains("no key"));
    }

    #[tokio::test]
    async fn test_rate_limit_failure_is_distinct() {
        let provider = ScriptedProvider::new();
        provider.push_err(ProviderError::RateLimitExhausted { attempts: 3 });
        let generator = generator_with(&provider);

        let outcome = generator.generate_full_recipe("Anything", "eggs", None).await;
        assert_eq!(
            outcome,
            RecipeOutcome::Failed(GenerationFailure::RateLimited { attempts: 3 })
        );
        assert!(outcome.into_draft().content.starts_with("Rate limited"));
    }
}
