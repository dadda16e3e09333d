//! Application state for the Opsdeck console
//!
//! This crate holds the persisted UI state: site branding, the navigation
//! menu, and the active language.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod system;

pub use system::{NavEntry, SystemStore, Website};
