use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hbnb_types::Entity;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::{Objects, ReloadReport, Storage};

/// Default backing file, relative to the working directory.
pub const DEFAULT_FILE: &str = "file.json";

/// Store persisted as one JSON document at a fixed path.
///
/// On-disk format:
/// ```text
/// {
///   "<TypeName>.<identity>": { "id": ..., "created_at": ..., ..., "__class__": "<TypeName>" },
///   ...
/// }
/// ```
///
/// `save()` writes the document to a sibling `.tmp` file and renames it over
/// the target, so the target is always either the previous or the new
/// document. There is no locking; concurrent writers race and the last
/// rename wins.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    objects: Objects,
}

impl FileStorage {
    /// Create an empty store backed by `path`. Nothing is read until
    /// [`reload`](Storage::reload).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: Objects::new(),
        }
    }

    /// Create a store at `path` and load whatever it already holds.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<(Self, ReloadReport)> {
        let mut store = Self::new(path);
        let report = store.reload()?;
        Ok((store, report))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn encode(&self) -> StoreResult<String> {
        let document: serde_json::Map<String, Value> = self
            .objects
            .iter()
            .map(|(key, entity)| (key.to_string(), Value::Object(entity.to_record())))
            .collect();
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

impl Storage for FileStorage {
    fn all(&self) -> &Objects {
        &self.objects
    }

    fn all_mut(&mut self) -> &mut Objects {
        &mut self.objects
    }

    fn save(&mut self) -> StoreResult<()> {
        let json = self.encode()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), objects = self.objects.len(), "store saved");
        Ok(())
    }

    fn reload(&mut self) -> StoreResult<ReloadReport> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store file; nothing to load");
                return Ok(ReloadReport::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        if text.trim().is_empty() {
            debug!(path = %self.path.display(), "empty store file; nothing to load");
            return Ok(ReloadReport::default());
        }

        let Value::Object(entries) = serde_json::from_str::<Value>(&text)? else {
            return Err(StoreError::Malformed {
                path: self.path.clone(),
                reason: "top-level value is not an object".into(),
            });
        };

        let mut report = ReloadReport::default();
        for (key, value) in entries {
            let Value::Object(record) = value else {
                warn!(%key, "store entry is not an object; skipping");
                report.skipped += 1;
                continue;
            };
            match Entity::from_record(&record) {
                Ok(entity) => {
                    let derived = entity.key();
                    if derived.to_string() != key {
                        warn!(%key, %derived, "store key does not match its record; using record identity");
                    }
                    self.objects.insert(derived, entity);
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!(%key, error = %e, "cannot reconstruct store entry; skipping");
                    report.skipped += 1;
                }
            }
        }

        debug!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "store reloaded"
        );
        Ok(report)
    }
}
