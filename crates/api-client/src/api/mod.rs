//! Feature call modules
//!
//! Thin typed request builders, one module per backend feature. Each maps an
//! endpoint onto the transport adapter's verb methods and trusts the
//! pipeline to have already classified the outcome — no error handling or
//! notification logic lives here.

pub mod dashboard;
pub mod schedule;
pub mod user;
