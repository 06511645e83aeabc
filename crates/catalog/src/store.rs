//! Component persistence contract + in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use railstock_core::ComponentId;

use crate::component::{Component, ComponentDraft};

/// Durable storage and retrieval of components with data-level integrity.
///
/// The one property implementations must not weaken: [`ComponentStore::update`]
/// is a compare-and-swap on `version` — a stale read never clobbers a racing
/// write.
#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Fetch a component by id. No side effects.
    async fn find_by_id(&self, id: ComponentId) -> Result<Option<Component>, StoreError>;

    /// List one page of components ordered by id ascending.
    ///
    /// `filter` is an optional case-insensitive substring match applied to
    /// `name` OR `unique_number`. The returned total reflects the filtered
    /// set, not the whole table. Ordering by id keeps pages stable under
    /// concurrent inserts/deletes (best-effort; pages are not transactionally
    /// isolated from each other).
    async fn list(
        &self,
        filter: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Component>, u64), StoreError>;

    /// Insert a new component, assigning its id and initial version.
    ///
    /// Fails with [`StoreError::UniqueConflict`] when `unique_number` collides
    /// with an existing record.
    async fn insert(&self, draft: ComponentDraft) -> Result<Component, StoreError>;

    /// Conditionally write a mutated copy of a previously fetched component.
    ///
    /// The write applies only if the stored record still carries
    /// `component.version`; on success the version is bumped, `updated_at`
    /// refreshed, and the stored record returned.
    /// [`StoreError::VersionConflict`] means the record changed since the
    /// caller's fetch and nothing was written; [`StoreError::NotFound`] means
    /// it no longer exists. `can_assign_quantity` is never written back.
    async fn update(&self, component: &Component) -> Result<Component, StoreError>;

    /// Delete a component by id.
    ///
    /// [`StoreError::ReferentialConflict`] is reserved for rejections by
    /// referencing records, should components ever gain any.
    async fn delete_by_id(&self, id: ComponentId) -> Result<(), StoreError>;
}

/// Component store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("component not found: {0}")]
    NotFound(ComponentId),
    #[error("unique number already in use: {0}")]
    UniqueConflict(String),
    #[error("stale version {expected} for component {id}")]
    VersionConflict { id: ComponentId, expected: i64 },
    #[error("component {0} is still referenced")]
    ReferentialConflict(ComponentId),
    #[error("storage error: {0}")]
    Storage(String),
}

/// In-memory component store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryComponentStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<i64, Component>,
    last_id: i64,
}

impl InMemoryComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl ComponentStore for InMemoryComponentStore {
    async fn find_by_id(&self, id: ComponentId) -> Result<Option<Component>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.get(&id.as_i64()).cloned())
    }

    async fn list(
        &self,
        filter: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Component>, u64), StoreError> {
        let inner = self.inner.read().unwrap();
        let mut matches: Vec<&Component> = inner
            .records
            .values()
            .filter(|c| filter.is_none_or(|term| c.matches(term)))
            .collect();
        matches.sort_by_key(|c| c.id);

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn insert(&self, draft: ComponentDraft) -> Result<Component, StoreError> {
        let mut inner = self.inner.write().unwrap();
        if inner
            .records
            .values()
            .any(|c| c.unique_number == draft.unique_number())
        {
            return Err(StoreError::UniqueConflict(draft.unique_number().to_string()));
        }

        inner.last_id += 1;
        let now = Utc::now();
        let component = Component {
            id: ComponentId::new(inner.last_id),
            name: draft.name().to_string(),
            unique_number: draft.unique_number().to_string(),
            can_assign_quantity: draft.can_assign_quantity(),
            quantity: draft.quantity(),
            version: 1,
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(component.id.as_i64(), component.clone());
        Ok(component)
    }

    async fn update(&self, component: &Component) -> Result<Component, StoreError> {
        let mut inner = self.inner.write().unwrap();
        if inner
            .records
            .values()
            .any(|c| c.id != component.id && c.unique_number == component.unique_number)
        {
            return Err(StoreError::UniqueConflict(component.unique_number.clone()));
        }

        let Some(stored) = inner.records.get_mut(&component.id.as_i64()) else {
            return Err(StoreError::NotFound(component.id));
        };
        if stored.version != component.version {
            return Err(StoreError::VersionConflict {
                id: component.id,
                expected: component.version,
            });
        }

        let mut next = component.clone();
        next.version = stored.version + 1;
        next.created_at = stored.created_at;
        next.can_assign_quantity = stored.can_assign_quantity;
        next.updated_at = Utc::now();
        *stored = next.clone();
        Ok(next)
    }

    async fn delete_by_id(&self, id: ComponentId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        match inner.records.remove(&id.as_i64()) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }
}
