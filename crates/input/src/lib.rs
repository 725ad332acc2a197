//! Input: raw keys mapped to high-level actions.
//!
//! # Invariants
//! - Handlers consume [`Action`]s, never raw key events.
//! - Keys without a binding map to [`Action::Noop`].

pub mod action;

pub use action::{Action, Key};

pub fn crate_info() -> &'static str {
    "farmstead-input v0.1.0"
}
