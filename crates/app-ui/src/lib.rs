//! Console UI shell for Opsdeck
//!
//! This crate provides the navigation layer the HTTP pipeline redirects
//! through: the console's route table, a URL router, and a history with the
//! replace semantics session expiry relies on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;

pub use navigation::{History, HistoryNavigator, Route, Router};
