//! Business rules over the component store.

use std::sync::Arc;

use tracing::warn;

use railstock_core::{ComponentId, DomainError, DomainResult, Page, PageRequest};

use crate::component::{Component, ComponentDraft};
use crate::store::{ComponentStore, StoreError};

/// Raw creation input as received from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateComponent {
    pub name: String,
    pub unique_number: String,
    pub can_assign_quantity: bool,
    pub quantity: Option<i64>,
}

/// Business-rule layer over a [`ComponentStore`].
///
/// Stateless between calls: every operation re-fetches whatever it needs, and
/// correctness under concurrent callers rests entirely on the store's
/// conditional-update contract. Failed conditional updates are never retried
/// here — a blind retry would re-apply a business check against state that is
/// already known to be stale.
pub struct InventoryService {
    store: Arc<dyn ComponentStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn ComponentStore>) -> Self {
        Self { store }
    }

    /// Create a component, returning the record with its assigned id.
    pub async fn create(&self, input: CreateComponent) -> DomainResult<Component> {
        let draft = ComponentDraft::new(
            &input.name,
            &input.unique_number,
            input.can_assign_quantity,
            input.quantity,
        )?;

        match self.store.insert(draft).await {
            Ok(component) => Ok(component),
            Err(StoreError::UniqueConflict(number)) => Err(DomainError::duplicate_key(number)),
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Fetch a component; `Ok(None)` when the id is unknown.
    pub async fn get(&self, id: ComponentId) -> DomainResult<Option<Component>> {
        self.store.find_by_id(id).await.map_err(storage_error)
    }

    /// One page of components, optionally filtered by a case-insensitive
    /// substring over name or unique number. Blank search terms are treated
    /// as absent.
    pub async fn list(
        &self,
        search_term: Option<&str>,
        page_number: u64,
        page_size: u64,
    ) -> DomainResult<Page<Component>> {
        let request = PageRequest::new(page_number, page_size)?;
        let filter = search_term.map(str::trim).filter(|term| !term.is_empty());

        let (items, total_count) = self
            .store
            .list(filter, request.offset(), request.limit())
            .await
            .map_err(storage_error)?;
        Ok(Page::new(items, total_count, request))
    }

    /// Set the stock level of a quantity-assignable component.
    ///
    /// On a lost race the outcome distinguishes "deleted meanwhile"
    /// (`NotFound`) from "modified meanwhile" (`Conflict`); retrying is the
    /// caller's decision.
    pub async fn update_quantity(
        &self,
        id: ComponentId,
        new_quantity: i64,
    ) -> DomainResult<Component> {
        if new_quantity < 1 {
            return Err(DomainError::validation(
                "quantity must be a positive integer",
            ));
        }

        let Some(mut component) = self.store.find_by_id(id).await.map_err(storage_error)? else {
            return Err(DomainError::NotFound);
        };
        component.assign_quantity(new_quantity)?;

        match self.store.update(&component).await {
            Ok(stored) => Ok(stored),
            Err(StoreError::NotFound(_)) => Err(DomainError::NotFound),
            Err(StoreError::VersionConflict { .. }) => {
                warn!(component_id = %id, "concurrency conflict during quantity update");
                // The record may have been deleted rather than modified;
                // re-check before answering.
                match self.store.find_by_id(id).await.map_err(storage_error)? {
                    None => Err(DomainError::NotFound),
                    Some(_) => Err(DomainError::conflict(format!(
                        "component {id} was modified concurrently"
                    ))),
                }
            }
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Remove a component entirely.
    pub async fn delete(&self, id: ComponentId) -> DomainResult<()> {
        match self.store.delete_by_id(id).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => Err(DomainError::NotFound),
            Err(StoreError::ReferentialConflict(_)) => Err(DomainError::referential_conflict(
                format!("component {id} is referenced by other records"),
            )),
            Err(err) => Err(storage_error(err)),
        }
    }
}

fn storage_error(err: StoreError) -> DomainError {
    warn!(error = %err, "component store failure");
    DomainError::storage(err.to_string())
}
