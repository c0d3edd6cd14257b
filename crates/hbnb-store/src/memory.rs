use crate::error::StoreResult;
use crate::traits::{Objects, ReloadReport, Storage};

/// In-memory store with no backing file.
///
/// Intended for tests and embedding. `save()` only counts calls and
/// `reload()` loads nothing.
#[derive(Default)]
pub struct InMemoryStorage {
    objects: Objects,
    saves: usize,
}

impl InMemoryStorage {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities currently tracked.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// How many times `save()` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Storage for InMemoryStorage {
    fn all(&self) -> &Objects {
        &self.objects
    }

    fn all_mut(&mut self) -> &mut Objects {
        &mut self.objects
    }

    fn save(&mut self) -> StoreResult<()> {
        self.saves += 1;
        Ok(())
    }

    fn reload(&mut self) -> StoreResult<ReloadReport> {
        Ok(ReloadReport::default())
    }
}

impl std::fmt::Debug for InMemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStorage")
            .field("object_count", &self.objects.len())
            .field("saves", &self.saves)
            .finish()
    }
}
