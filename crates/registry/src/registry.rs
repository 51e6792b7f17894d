//! Loading and keyed lookup of layout documents.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use boxsplit_core::{slug::LAYOUT_SUFFIX, LayoutDocument};
use thiserror::Error;

/// Errors that can occur while loading layout documents.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Wrap IO failures when reading document files.
    #[error("failed to read layout document: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap JSON parsing issues.
    #[error("failed to parse layout document: {0}")]
    Parse(#[from] serde_json::Error),
    /// Structural errors describing why a document is unusable.
    #[error("invalid layout document: {0}")]
    Invalid(String),
}

/// Process-lifetime store of layout documents, addressed by key.
///
/// Keys iterate in lexical order so anything derived from the registry is
/// reproducible. Lookup of an absent key is `None`, never an error.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    documents: BTreeMap<String, LayoutDocument>,
}

impl LayoutRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `document` under `key`, replacing any previous holder.
    pub fn insert(&mut self, key: impl Into<String>, document: LayoutDocument) {
        self.documents.insert(key.into(), document);
    }

    /// Document registered under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&LayoutDocument> {
        self.documents.get(key)
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Registered keys in lexical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Parse one document from a JSON string and validate its shape.
    pub fn parse_document(input: &str) -> Result<LayoutDocument, RegistryError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        if !value.is_array() {
            return Err(RegistryError::Invalid(
                "top-level value must be an array of entries".into(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load every `*_layout.json` file in `dir`.
    ///
    /// The key is the file stem with the layout suffix removed. Non-layout
    /// files are ignored; an unreadable or malformed layout file fails the
    /// whole load.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir.as_ref())?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .collect();
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            let Some(key) = layout_key(&path) else {
                continue;
            };
            let raw = fs::read_to_string(&path)?;
            let document = Self::parse_document(&raw).map_err(|err| match err {
                RegistryError::Invalid(msg) => {
                    RegistryError::Invalid(format!("{}: {msg}", path.display()))
                }
                other => other,
            })?;
            tracing::debug!(
                key = %key,
                path = %path.display(),
                entries = document.len(),
                "loaded layout document"
            );
            registry.insert(key, document);
        }
        Ok(registry)
    }
}

/// Registry key for `path` when it names a layout document file.
fn layout_key(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_suffix(LAYOUT_SUFFIX).map(str::to_string)
}
