//! Incremental rendering state.
//!
//! Each module's extracted data is hashed with xxh3; a module whose hash is
//! unchanged since the last run is not re-rendered. The render context
//! (engine version, formats) is hashed too, and a context change invalidates
//! every entry.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::Result;
use crate::render::ModuleData;

pub const FINGERPRINT_FILE: &str = ".fingerprints.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredFingerprints {
    context: String,
    modules: BTreeMap<String, String>,
}

pub struct FingerprintStore {
    path: PathBuf,
    context: String,
    previous: BTreeMap<String, String>,
    current: BTreeMap<String, String>,
}

impl FingerprintStore {
    /// Loads previous fingerprints from `data_dir`. A missing or unreadable
    /// file, or one written under a different context, starts empty.
    pub fn load(data_dir: &Path, context: &str) -> Self {
        let path = data_dir.join(FINGERPRINT_FILE);
        let context = hash_hex(context.as_bytes());

        let previous = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<StoredFingerprints>(&content) {
                Ok(stored) if stored.context == context => stored.modules,
                Ok(_) => {
                    tracing::info!("Render settings changed, regenerating all modules");
                    BTreeMap::new()
                }
                Err(e) => {
                    tracing::warn!("Ignoring corrupt {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            context,
            previous,
            current: BTreeMap::new(),
        }
    }

    pub fn fingerprint(module: &ModuleData) -> Result<String> {
        let bytes = serde_json::to_vec(module)?;
        Ok(hash_hex(&bytes))
    }

    pub fn is_unchanged(&self, module_name: &str, fingerprint: &str) -> bool {
        self.previous
            .get(module_name)
            .is_some_and(|previous| previous == fingerprint)
    }

    /// Records the fingerprint of a module rendered (or kept) in this run
    pub fn record(&mut self, module_name: &str, fingerprint: String) {
        self.current.insert(module_name.to_string(), fingerprint);
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Writes this run's fingerprints; modules not seen in this run are dropped.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredFingerprints {
            context: self.context.clone(),
            modules: self.current.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }
}

fn hash_hex(bytes: &[u8]) -> String {
    format!("{:016x}", xxh3_64(bytes))
}
