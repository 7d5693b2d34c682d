//! Saved-recipe pantry.
//!
//! An ordered list of records keyed (loosely) by title. Titles are not
//! unique: saving the same title twice keeps both, removing a title drops
//! every record carrying it. Each mutation persists the whole collection
//! before returning.

mod storage;

pub use storage::{JsonFileStorage, MemoryStorage, PantryStorage};

use crate::config::{PantryConfig, StorageKind};
use crate::error::PantryError;
use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Timestamp layout for `saved_date`
pub const SAVED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A saved recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub saved_date: String,
    /// Any other fields submitted with the recipe, stored as given
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recipe submitted for saving, before it is timestamped
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewRecipe {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        NewRecipe {
            title: title.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    fn stamp(mut self, saved_date: String) -> RecipeRecord {
        // The pantry owns the timestamp
        self.extra.remove("saved_date");
        RecipeRecord {
            title: self.title,
            content: self.content,
            saved_date,
            extra: self.extra,
        }
    }
}

/// Result of a removal: how many records went, and the titles left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub removed: usize,
    pub titles: Vec<String>,
}

impl Removal {
    pub fn matched(&self) -> bool {
        self.removed > 0
    }
}

pub struct Pantry {
    records: Vec<RecipeRecord>,
    storage: Box<dyn PantryStorage>,
}

impl Pantry {
    /// Open a pantry over `storage`, loading whatever it holds.
    pub fn open(storage: Box<dyn PantryStorage>) -> Self {
        let records = storage.load();
        info!(
            "Opened pantry ({}) with {} recipes",
            storage.describe(),
            records.len()
        );
        Pantry { records, storage }
    }

    /// Open the persistence variant selected in configuration.
    pub fn from_config(config: &PantryConfig) -> Self {
        match config.storage {
            StorageKind::File => Self::open(Box::new(JsonFileStorage::new(&config.path))),
            StorageKind::Memory => Self::in_memory(),
        }
    }

    /// An empty pantry that lives only in this process.
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStorage::new()))
    }

    /// Timestamp and append a recipe, persist, and return all titles.
    pub fn add(&mut self, recipe: NewRecipe) -> Result<Vec<String>, PantryError> {
        let record = recipe.stamp(Local::now().format(SAVED_DATE_FORMAT).to_string());
        let title = record.title.clone();

        self.records.push(record);
        if let Err(e) = self.storage.save(&self.records) {
            self.records.pop();
            return Err(e);
        }

        info!("Saved '{}' to pantry", title);
        Ok(self.list())
    }

    /// Drop every record titled exactly `title`, persist, and return what is left.
    ///
    /// A title with no match leaves the pantry untouched and reports
    /// `removed == 0`.
    pub fn remove(&mut self, title: &str) -> Result<Removal, PantryError> {
        let remaining: Vec<RecipeRecord> = self
            .records
            .iter()
            .filter(|r| r.title != title)
            .cloned()
            .collect();
        let removed = self.records.len() - remaining.len();

        if removed > 0 {
            self.storage.save(&remaining)?;
            self.records = remaining;
            info!("Removed {} recipe(s) titled '{}' from pantry", removed, title);
        }

        Ok(Removal {
            removed,
            titles: self.list(),
        })
    }

    /// Titles in storage order.
    pub fn list(&self) -> Vec<String> {
        self.records.iter().map(|r| r.title.clone()).collect()
    }

    /// First record titled exactly `title`.
    pub fn get(&self, title: &str) -> Result<&RecipeRecord, PantryError> {
        self.records
            .iter()
            .find(|r| r.title == title)
            .ok_or_else(|| PantryError::NotFound(title.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
