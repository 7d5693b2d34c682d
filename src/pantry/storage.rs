use crate::error::PantryError;
use crate::pantry::RecipeRecord;
use log::{debug, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Backing collection for a [`Pantry`](crate::pantry::Pantry).
///
/// Storage is whole-collection granular: `load` returns everything, `save`
/// replaces everything.
pub trait PantryStorage: Send {
    /// Short description for logs
    fn describe(&self) -> String;

    /// Read the stored collection. Unreadable state is an empty pantry.
    fn load(&self) -> Vec<RecipeRecord>;

    /// Replace the stored collection.
    fn save(&self, records: &[RecipeRecord]) -> Result<(), PantryError>;
}

/// Pantry persisted as a pretty-printed JSON array, rewritten on every save.
///
/// Two processes pointed at the same file race: each rewrites the whole file
/// from its own copy, so the last writer wins and the other's change is lost.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PantryStorage for JsonFileStorage {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn load(&self) -> Vec<RecipeRecord> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No pantry file at {}, starting empty", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read pantry {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Pantry {} is not valid JSON ({}), starting empty",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[RecipeRecord]) -> Result<(), PantryError> {
        // Four-space indent, same layout as existing pantry files
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records.serialize(&mut serializer)?;

        std::fs::write(&self.path, buf)?;
        Ok(())
    }
}

/// Pantry kept only in process memory; gone on restart.
///
/// The [`Pantry`](crate::pantry::Pantry) already holds the live records, so
/// there is nothing to load and nothing to write.
#[derive(Debug, Default)]
pub struct MemoryStorage;

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage
    }
}

impl PantryStorage for MemoryStorage {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn load(&self) -> Vec<RecipeRecord> {
        Vec::new()
    }

    fn save(&self, _records: &[RecipeRecord]) -> Result<(), PantryError> {
        Ok(())
    }
}
