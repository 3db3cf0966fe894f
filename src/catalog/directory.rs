//! Catalog served from a local directory
//!
//! Documents live under `<root>/summary/<name>`; media paths in summaries are
//! relative to `<root>/data`.

use super::{CatalogError, Summary, SummarySource, DICTIONARY_NAME};
use crate::search::Dictionary;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Catalog rooted at a directory
#[derive(Debug, Clone)]
pub struct CatalogDirectory {
    root: PathBuf,
}

impl CatalogDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of document `name`, refusing names that leave the summary directory
    pub fn document_path(&self, name: &str) -> Result<PathBuf, CatalogError> {
        let relative = Path::new(name);
        let plain = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !plain {
            return Err(CatalogError::InvalidName(name.to_string()));
        }

        Ok(self.root.join("summary").join(relative))
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, CatalogError> {
        let path = self.document_path(name)?;

        let text = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                CatalogError::NotFound(name.to_string())
            } else {
                CatalogError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&text).map_err(|source| CatalogError::Malformed {
            name: name.to_string(),
            source,
        })
    }
}

impl SummarySource for CatalogDirectory {
    fn summary(&self, name: &str) -> Result<Summary, CatalogError> {
        log::debug!("Reading summary {:?}", name);
        self.read(name)
    }

    fn dictionary(&self) -> Result<Dictionary, CatalogError> {
        log::debug!("Reading dictionary from {:?}", self.root);
        self.read(DICTIONARY_NAME)
    }
}
