use crate::domain::model::{LookupKey, Resolution};
use crate::domain::ports::LocalIndex;
use crate::utils::error::{Result, RocksError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.json";
pub const INDEX_VERSION: u32 = 1;

/// One body in the index document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyRecord {
    pub name: String,
    #[serde(default)]
    pub number: Option<u64>,
    pub id: String,
    /// Alternative designations, including the provisional one.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// On-disk shape of the cached name/number index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDocument {
    pub version: u32,
    pub built: DateTime<Utc>,
    pub bodies: Vec<BodyRecord>,
}

/// In-memory name/number index, loaded once from the cache directory and
/// read-only afterwards.
pub struct NameNumberIndex {
    bodies: Vec<BodyRecord>,
    by_name: HashMap<String, usize>,
    by_number: HashMap<u64, usize>,
    by_alias: HashMap<String, usize>,
    built: DateTime<Utc>,
}

impl NameNumberIndex {
    pub fn from_document(document: IndexDocument) -> Result<Self> {
        if document.version != INDEX_VERSION {
            return Err(RocksError::IndexError {
                message: format!(
                    "unsupported index version {} (expected {})",
                    document.version, INDEX_VERSION
                ),
            });
        }

        let mut by_name = HashMap::new();
        let mut by_number = HashMap::new();
        let mut by_alias = HashMap::new();

        for (position, body) in document.bodies.iter().enumerate() {
            by_name.insert(body.name.to_lowercase(), position);
            if let Some(number) = body.number {
                by_number.insert(number, position);
            }
            for alias in &body.aliases {
                by_alias.insert(alias.to_lowercase(), position);
            }
        }

        Ok(Self {
            bodies: document.bodies,
            by_name,
            by_number,
            by_alias,
            built: document.built,
        })
    }

    /// Load the index from an explicit file path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)?;
        let document: IndexDocument = serde_json::from_slice(&raw)?;
        Self::from_document(document)
    }

    /// Load the index from the cache directory. A missing file is not an
    /// error, it just means no local pass is possible.
    pub fn load_from_cache(cache_dir: &Path) -> Result<Option<Self>> {
        let path = cache_dir.join(INDEX_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Validate a downloaded index document and install it atomically
    /// into the cache directory. Returns the installed path.
    pub fn install(cache_dir: &Path, raw: &[u8]) -> Result<PathBuf> {
        let document: IndexDocument = serde_json::from_slice(raw)?;
        if document.version != INDEX_VERSION {
            return Err(RocksError::IndexError {
                message: format!(
                    "downloaded index has unsupported version {}",
                    document.version
                ),
            });
        }

        fs::create_dir_all(cache_dir)?;
        let path = cache_dir.join(INDEX_FILE);
        let staging = cache_dir.join(format!("{}.tmp", INDEX_FILE));
        fs::write(&staging, raw)?;
        fs::rename(&staging, &path)?;
        Ok(path)
    }

    pub fn built(&self) -> DateTime<Utc> {
        self.built
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn resolution_at(&self, position: usize) -> Resolution {
        let body = &self.bodies[position];
        Resolution {
            name: Some(body.name.clone()),
            number: body.number,
            id: Some(body.id.clone()),
        }
    }
}

impl LocalIndex for NameNumberIndex {
    fn lookup(&self, key: &LookupKey) -> Option<Resolution> {
        let position = match key {
            LookupKey::Number(number) => self.by_number.get(number),
            LookupKey::Name(name) => self
                .by_name
                .get(name)
                .or_else(|| self.by_alias.get(name)),
            LookupKey::Designation(designation) => {
                self.by_alias.get(&designation.to_lowercase())
            }
        }?;
        Some(self.resolution_at(*position))
    }

    fn len(&self) -> usize {
        NameNumberIndex::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_document() -> IndexDocument {
        IndexDocument {
            version: INDEX_VERSION,
            built: Utc::now(),
            bodies: vec![
                BodyRecord {
                    name: "Ceres".to_string(),
                    number: Some(1),
                    id: "Ceres".to_string(),
                    aliases: vec!["1943 XB".to_string()],
                },
                BodyRecord {
                    name: "Vesta".to_string(),
                    number: Some(4),
                    id: "Vesta".to_string(),
                    aliases: vec![],
                },
                BodyRecord {
                    name: "2001 JE2".to_string(),
                    number: None,
                    id: "2001_JE2".to_string(),
                    aliases: vec!["2001 JE2".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_lookup_by_name_is_case_insensitive() {
        let index = NameNumberIndex::from_document(sample_document()).unwrap();
        let hit = index.lookup(&LookupKey::Name("ceres".to_string())).unwrap();
        assert_eq!(hit.name.as_deref(), Some("Ceres"));
        assert_eq!(hit.number, Some(1));
        assert_eq!(hit.id.as_deref(), Some("Ceres"));
    }

    #[test]
    fn test_lookup_by_number_and_alias() {
        let index = NameNumberIndex::from_document(sample_document()).unwrap();
        assert_eq!(
            index
                .lookup(&LookupKey::Number(4))
                .unwrap()
                .name
                .as_deref(),
            Some("Vesta")
        );
        assert_eq!(
            index
                .lookup(&LookupKey::Name("1943 xb".to_string()))
                .unwrap()
                .number,
            Some(1)
        );
        // Unnumbered body found through its designation
        let hit = index
            .lookup(&LookupKey::Designation("2001 JE2".to_string()))
            .unwrap();
        assert_eq!(hit.number, None);
        assert_eq!(hit.id.as_deref(), Some("2001_JE2"));
    }

    #[test]
    fn test_unknown_keys_miss() {
        let index = NameNumberIndex::from_document(sample_document()).unwrap();
        assert!(index.lookup(&LookupKey::Number(99999)).is_none());
        assert!(index
            .lookup(&LookupKey::Name("doesnotexist123".to_string()))
            .is_none());
    }

    #[test]
    fn test_load_from_cache_roundtrip() {
        let cache = TempDir::new().unwrap();
        let raw = serde_json::to_vec(&sample_document()).unwrap();
        NameNumberIndex::install(cache.path(), &raw).unwrap();

        let index = NameNumberIndex::load_from_cache(cache.path())
            .unwrap()
            .unwrap();
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_missing_index_is_not_an_error() {
        let cache = TempDir::new().unwrap();
        assert!(NameNumberIndex::load_from_cache(cache.path())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_corrupt_index_fails_at_load_time() {
        let cache = TempDir::new().unwrap();
        fs::create_dir_all(cache.path()).unwrap();
        fs::write(cache.path().join(INDEX_FILE), b"not json at all").unwrap();
        assert!(NameNumberIndex::load_from_cache(cache.path()).is_err());
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let mut document = sample_document();
        document.version = INDEX_VERSION + 1;
        assert!(NameNumberIndex::from_document(document.clone()).is_err());

        let cache = TempDir::new().unwrap();
        let raw = serde_json::to_vec(&document).unwrap();
        assert!(NameNumberIndex::install(cache.path(), &raw).is_err());
    }
}
