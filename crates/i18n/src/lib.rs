//! Internationalization for the Opsdeck console
//!
//! This crate provides locale negotiation and message formatting. The
//! [`Translator`] doubles as the HTTP pipeline's message-lookup collaborator,
//! so notices the pipeline raises come out in the active locale.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lang;
pub mod translator;

pub use lang::Locale;
pub use translator::Translator;
