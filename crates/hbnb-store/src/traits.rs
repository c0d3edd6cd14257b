use std::collections::BTreeMap;

use hbnb_types::{Entity, EntityKey, EntityKind};

use crate::error::StoreResult;

/// The live key-to-entity mapping.
pub type Objects = BTreeMap<EntityKey, Entity>;

/// Outcome of a [`Storage::reload`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReloadReport {
    /// Entries reconstructed and inserted.
    pub loaded: usize,
    /// Entries that could not be reconstructed and were left out.
    pub skipped: usize,
}

/// Registry of live entities with whole-store persistence.
///
/// Implementations are single-threaded: the console runs one command to
/// completion before reading the next. Removal goes through
/// [`all_mut`](Storage::all_mut) or the [`remove`](Storage::remove) helper.
pub trait Storage {
    /// The live mapping of every tracked entity.
    fn all(&self) -> &Objects;

    /// Mutable access to the live mapping.
    fn all_mut(&mut self) -> &mut Objects;

    /// Track a fresh entity under its computed key.
    ///
    /// An entity whose key is already present replaces the existing one.
    fn register(&mut self, entity: Entity) {
        self.all_mut().insert(entity.key(), entity);
    }

    /// Persist every tracked entity, replacing any previous contents.
    fn save(&mut self) -> StoreResult<()>;

    /// Load persisted entities into the mapping.
    fn reload(&mut self) -> StoreResult<ReloadReport>;

    fn get(&self, key: &EntityKey) -> Option<&Entity> {
        self.all().get(key)
    }

    fn get_mut(&mut self, key: &EntityKey) -> Option<&mut Entity> {
        self.all_mut().get_mut(key)
    }

    /// Stop tracking `key`. Returns the removed entity, if any.
    fn remove(&mut self, key: &EntityKey) -> Option<Entity> {
        self.all_mut().remove(key)
    }

    /// Entities whose concrete kind is `kind`.
    fn of_kind(&self, kind: EntityKind) -> Vec<&Entity> {
        self.all().values().filter(|e| e.kind() == kind).collect()
    }

    /// Number of entities whose concrete kind is `kind`.
    fn count(&self, kind: EntityKind) -> usize {
        self.all().keys().filter(|k| k.kind == kind).count()
    }
}
