use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use super::domain::AdDocument;

/// Storage abstraction over parsed AD documents so the service and CLI can be
/// exercised against memory or disk interchangeably.
pub trait DirectiveStore: Send + Sync {
    fn get(&self, ad_id: &str) -> Result<AdDocument, DirectiveStoreError>;
    /// All stored directives, ordered by `ad_id`.
    fn list(&self) -> Result<Vec<AdDocument>, DirectiveStoreError>;
    fn put(&self, document: &AdDocument) -> Result<(), DirectiveStoreError>;
}

/// Error enumeration for directive storage failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveStoreError {
    #[error("directive '{ad_id}' not found")]
    NotFound { ad_id: String },
    #[error("directive id '{ad_id}' is not a valid document name")]
    InvalidId { ad_id: String },
    #[error("io failure for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed directive document '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Directory-backed store keeping one pretty-printed JSON file per AD,
/// `<ad_id>.json`. Legacy `<name>_parsed.json` files from the extraction
/// pipeline load the same way since listing reads every `*.json` in the
/// directory.
#[derive(Debug, Clone)]
pub struct FileDirectiveStore {
    directory: PathBuf,
}

impl FileDirectiveStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn document_path(&self, ad_id: &str) -> PathBuf {
        self.directory.join(format!("{ad_id}.json"))
    }

    // Ids become file names; anything that could leave the library directory
    // is rejected before a path is built.
    fn valid_document_id(ad_id: &str) -> bool {
        !ad_id.is_empty() && !ad_id.contains(['/', '\\']) && !ad_id.contains("..")
    }

    fn read_document(&self, path: &Path) -> Result<AdDocument, DirectiveStoreError> {
        let raw = fs::read_to_string(path).map_err(|source| DirectiveStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| DirectiveStoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl DirectiveStore for FileDirectiveStore {
    fn get(&self, ad_id: &str) -> Result<AdDocument, DirectiveStoreError> {
        let path = Self::valid_document_id(ad_id).then(|| self.document_path(ad_id));
        let Some(path) = path.filter(|path| path.exists()) else {
            // The id-keyed filename is a convention, not a guarantee; fall
            // back to scanning for documents stored under legacy names.
            return self
                .list()?
                .into_iter()
                .find(|document| document.ad_id == ad_id)
                .ok_or_else(|| DirectiveStoreError::NotFound {
                    ad_id: ad_id.to_string(),
                });
        };
        self.read_document(&path)
    }

    fn list(&self) -> Result<Vec<AdDocument>, DirectiveStoreError> {
        if !self.directory.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.directory).map_err(|source| DirectiveStoreError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let mut documents = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|source| DirectiveStoreError::Io {
                path: self.directory.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read_document(&path) {
                Ok(document) => {
                    documents.insert(document.ad_id.clone(), document);
                }
                Err(err) => {
                    // One corrupt file must not take the whole library down.
                    warn!(path = %path.display(), error = %err, "skipping unreadable directive");
                }
            }
        }

        Ok(documents.into_values().collect())
    }

    fn put(&self, document: &AdDocument) -> Result<(), DirectiveStoreError> {
        if !Self::valid_document_id(&document.ad_id) {
            return Err(DirectiveStoreError::InvalidId {
                ad_id: document.ad_id.clone(),
            });
        }

        fs::create_dir_all(&self.directory).map_err(|source| DirectiveStoreError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let path = self.document_path(&document.ad_id);
        let raw = serde_json::to_string_pretty(document).map_err(|source| {
            DirectiveStoreError::Malformed {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, raw).map_err(|source| DirectiveStoreError::Io { path, source })
    }
}

/// In-memory store for tests and the CLI demo.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectiveStore {
    documents: Arc<Mutex<BTreeMap<String, AdDocument>>>,
}

impl InMemoryDirectiveStore {
    pub fn with_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = AdDocument>,
    {
        let store = Self::default();
        {
            let mut guard = store.documents.lock().expect("directive mutex poisoned");
            for document in documents {
                guard.insert(document.ad_id.clone(), document);
            }
        }
        store
    }
}

impl DirectiveStore for InMemoryDirectiveStore {
    fn get(&self, ad_id: &str) -> Result<AdDocument, DirectiveStoreError> {
        let guard = self.documents.lock().expect("directive mutex poisoned");
        guard
            .get(ad_id)
            .cloned()
            .ok_or_else(|| DirectiveStoreError::NotFound {
                ad_id: ad_id.to_string(),
            })
    }

    fn list(&self) -> Result<Vec<AdDocument>, DirectiveStoreError> {
        let guard = self.documents.lock().expect("directive mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn put(&self, document: &AdDocument) -> Result<(), DirectiveStoreError> {
        let mut guard = self.documents.lock().expect("directive mutex poisoned");
        guard.insert(document.ad_id.clone(), document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directives::domain::ApplicabilityRules;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn sample(ad_id: &str) -> AdDocument {
        AdDocument {
            ad_id: ad_id.to_string(),
            title: Some("Fuselage inspection".to_string()),
            effective_date: None,
            applicability_rules: ApplicabilityRules {
                aircraft_models: vec!["MD-11".to_string()],
                ..ApplicabilityRules::default()
            },
            raw_applicability_text: None,
        }
    }

    fn scratch_dir() -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let suffix = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "ad-library-test-{}-{suffix}",
            std::process::id()
        ))
    }

    #[test]
    fn file_store_round_trips_documents_keyed_by_ad_id() {
        let dir = scratch_dir();
        let store = FileDirectiveStore::new(&dir);

        store.put(&sample("FAA-2025-23-53")).expect("put succeeds");
        store.put(&sample("EASA-2025-0254R1")).expect("put succeeds");

        let fetched = store.get("FAA-2025-23-53").expect("document exists");
        assert_eq!(fetched, sample("FAA-2025-23-53"));

        let listed = store.list().expect("list succeeds");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].ad_id, "EASA-2025-0254R1");

        fs::remove_dir_all(&dir).expect("scratch dir removed");
    }

    #[test]
    fn file_store_skips_unreadable_documents_when_listing() {
        let dir = scratch_dir();
        let store = FileDirectiveStore::new(&dir);
        store.put(&sample("FAA-2025-23-53")).expect("put succeeds");
        fs::write(dir.join("broken.json"), "{not json").expect("write succeeds");

        let listed = store.list().expect("list succeeds despite corrupt file");
        assert_eq!(listed.len(), 1);

        fs::remove_dir_all(&dir).expect("scratch dir removed");
    }

    #[test]
    fn file_store_rejects_ids_that_escape_the_library_directory() {
        let dir = scratch_dir();
        let store = FileDirectiveStore::new(&dir);

        for bad_id in ["../escaped", "a/b", "a\\b", "FAA..53", ""] {
            let err = store
                .put(&sample(bad_id))
                .expect_err("path-shaped id rejected");
            assert!(matches!(err, DirectiveStoreError::InvalidId { .. }));
        }

        // Nothing may land next to the library, and the library itself stays
        // untouched by rejected writes.
        assert!(!std::env::temp_dir().join("escaped.json").exists());
        assert!(!dir.exists());
    }

    #[test]
    fn lookup_with_a_path_shaped_id_reads_nothing_outside_the_library() {
        let dir = scratch_dir();
        let store = FileDirectiveStore::new(&dir);
        store.put(&sample("FAA-2025-23-53")).expect("put succeeds");

        let err = store.get("../FAA-2025-23-53").expect_err("no such directive");
        assert!(matches!(err, DirectiveStoreError::NotFound { .. }));

        fs::remove_dir_all(&dir).expect("scratch dir removed");
    }

    #[test]
    fn missing_directory_lists_empty() {
        let store = FileDirectiveStore::new(scratch_dir());
        assert!(store.list().expect("empty list").is_empty());
    }

    #[test]
    fn missing_document_is_not_found() {
        let store = InMemoryDirectiveStore::default();
        let err = store.get("FAA-0000-00-00").expect_err("not found");
        assert!(matches!(err, DirectiveStoreError::NotFound { .. }));
    }

    #[test]
    fn in_memory_store_lists_in_id_order() {
        let store = InMemoryDirectiveStore::with_documents([
            sample("FAA-2025-23-53"),
            sample("EASA-2025-0254R1"),
        ]);
        let listed = store.list().expect("list succeeds");
        assert_eq!(listed[0].ad_id, "EASA-2025-0254R1");
        assert_eq!(listed[1].ad_id, "FAA-2025-23-53");
    }
}
