//! Deterministic in-process provider.
//!
//! Replays queued completions in order, so generation and HTTP flows can be
//! exercised without network access or API costs.

use crate::error::ProviderError;
use crate::providers::CompletionProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Script {
    queue: VecDeque<Result<String, ProviderError>>,
    default_response: Option<String>,
    prompts: Vec<String>,
}

/// A scripted provider. Clones share the same script, so a test can keep a
/// handle for inspection after boxing another clone into a service.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    /// Create a provider with an empty script and no default response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that answers every prompt with `response`.
    pub fn always(response: &str) -> Self {
        let provider = Self::new();
        provider.lock().default_response = Some(response.to_string());
        provider
    }

    /// Queue a successful completion.
    pub fn push_ok(&self, response: &str) {
        self.lock().queue.push_back(Ok(response.to_string()));
    }

    /// Queue a failure.
    pub fn push_err(&self, error: ProviderError) {
        self.lock().queue.push_back(Err(error));
    }

    /// Number of prompts received so far.
    pub fn calls(&self) -> usize {
        self.lock().prompts.len()
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test thread must not wedge the other holders.
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut script = self.lock();
        script.prompts.push(prompt.to_string());

        match script.queue.pop_front() {
            Some(result) => result,
            None => script.default_response.clone().ok_or_else(|| {
                ProviderError::MalformedResponse("scripted provider has no response".to_string())
            }),
        }
    }
}
