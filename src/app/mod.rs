//! Application layer: the country store, its state, and event handling.
//!
//! This module sits between the shell (main.rs) and the domain/storage
//! layers.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → CountryStore → Gateway
//!                                            ↓
//!                   Render ← View Model ← StoreState
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic
//! - [`modes`]: View toggle and sync policy types
//! - [`pending`]: Undo ledger for optimistic actions
//! - [`state`]: Owned state, derived views, and view model computation
//! - [`store`]: The shared store handle and its remote-backed actions
//!
//! # Example
//!
//! ```rust
//! use countrydeck::app::{CountryStore, StoreState};
//! use countrydeck::domain::sample::sample_countries;
//! use countrydeck::storage::MemoryGateway;
//! use std::sync::Arc;
//!
//! let store = CountryStore::new(Arc::new(MemoryGateway::new()))
//!     .with_state(StoreState::new(sample_countries()));
//! store.set_search_text("tokyo");
//! assert_eq!(store.read(|s| s.filtered().len()), 1);
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod pending;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{SyncPolicy, Toggle};
pub use state::{ContinentGroup, StoreState, VisibleView};
pub use store::CountryStore;
