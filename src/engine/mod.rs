//! Regime simulation & reactive visualization engine.
//!
//! Layered leaf-first:
//!
//! - [`regime`]: discrete regime + progression state machine
//! - [`metrics`]: display metric derivation (index, confidence, window)
//! - [`noise`]: injectable randomness
//! - [`pulse`]: idle-reactive micro-pulse lifecycle
//! - [`controller`]: single owner of all live state, the four inbound ops
//! - [`projection`]: pure snapshot-to-visual-parameters mapping
//! - [`runtime`]: tokio task hosting the controller and its cadences

pub mod config;
pub mod controller;
pub mod metrics;
pub mod noise;
pub mod projection;
pub mod pulse;
pub mod regime;
pub mod runtime;
pub mod snapshot;
