//! Catalog domain module.
//!
//! Business rules for the train-component catalog: the `Component` entity and
//! its validated construction, the `ComponentStore` persistence contract, and
//! the `InventoryService` operations the HTTP layer calls.

pub mod component;
pub mod service;
pub mod store;

pub use component::{Component, ComponentDraft, NAME_MAX_LEN, UNIQUE_NUMBER_MAX_LEN};
pub use service::{CreateComponent, InventoryService};
pub use store::{ComponentStore, InMemoryComponentStore, StoreError};
