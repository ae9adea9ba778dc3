//! Presentation layer: view models and a plain-text renderer.
//!
//! The real UI toolkit lives outside this crate. What it needs from the store
//! is a display-ready description of the current view, which this module
//! provides, plus a text renderer the terminal shell uses.
//!
//! # Architecture
//!
//! ```text
//! StoreState → compute_viewmodel → ListViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Plain-text rendering of view models and detail screens
//!
//! # Example
//!
//! ```rust
//! use countrydeck::app::StoreState;
//! use countrydeck::domain::sample::sample_countries;
//! use countrydeck::ui::render;
//!
//! let state = StoreState::new(sample_countries());
//! let text = render(&state.compute_viewmodel());
//! assert!(text.contains("Indonesia"));
//! ```

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_detail};
pub use viewmodel::{
    DisplayRow, EmptyState, HeaderInfo, ListViewModel, SearchBarInfo, Section, StatusInfo,
};
