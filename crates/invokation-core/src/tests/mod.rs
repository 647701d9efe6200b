//! Crate-level tests.
//!
//! - `determinism.rs`: same seed and inputs produce identical states
//! - `integration.rs`: full cascades driven through the engine
//! - `helpers.rs`: a standard two-player setup and shortcuts shared with the
//!   unit tests

pub(crate) mod helpers;
