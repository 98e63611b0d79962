use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration, loaded once and passed to every component.
///
/// ```yaml
/// database:
///   host: ./data
///   name: sift
/// tables:
///   document_table: documents
///   index_table: indexes
/// search:
///   items_per_page: 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: Database,
    pub tables: Tables,
    pub search: Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    /// Directory holding the sled databases.
    pub host: PathBuf,
    pub name: String,
}

impl Default for Database {
    fn default() -> Self { Self { host: PathBuf::from("./data"), name: "sift".into() } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub document_table: String,
    pub index_table: String,
}

impl Default for Tables {
    fn default() -> Self { Self { document_table: "documents".into(), index_table: "indexes".into() } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Search {
    pub items_per_page: usize,
}

impl Default for Search {
    fn default() -> Self { Self { items_per_page: 10 } }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Load `path` if it exists, otherwise use the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.name.trim().is_empty() {
            return Err(Error::Config("database.name must not be empty".into()));
        }
        if self.tables.document_table.trim().is_empty() || self.tables.index_table.trim().is_empty() {
            return Err(Error::Config("table names must not be empty".into()));
        }
        if self.tables.document_table == self.tables.index_table {
            return Err(Error::Config("document_table and index_table must differ".into()));
        }
        if self.search.items_per_page == 0 {
            return Err(Error::Config("search.items_per_page must be at least 1".into()));
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf { self.database.host.join(&self.database.name) }

    /// Name of the secondary index on `word` over the index table.
    pub fn word_index(&self) -> String { format!("{}.word", self.tables.index_table) }
}
