//! Actions representing side effects for the shell to execute.
//!
//! [`handle_event`](crate::app::handle_event) returns a `Vec<Action>` next to
//! a "needs render" flag. Actions cover everything the store itself cannot do:
//! moving to another screen, surfacing an error, leaving the app.
//!
//! # Example
//!
//! ```rust
//! use countrydeck::app::Action;
//!
//! let actions = vec![Action::ShowError("network error: timed out".to_string())];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::domain::DetailParams;

/// Commands the shell executes after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Navigates to the detail screen.
    ///
    /// The detail screen renders these parameters verbatim and never re-reads
    /// the store.
    OpenDetail(DetailParams),

    /// Surfaces the message of a failed data action.
    ///
    /// The same message is already stored in the state's `error` field.
    ShowError(String),

    /// Leaves the list screen.
    Close,
}
