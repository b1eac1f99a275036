#![deny(unreachable_pub)]

//! Regime simulation & reactive visualization engine for the Alpha Weather
//! demo dashboard. See [`engine`] for the simulation core and [`infra`] for
//! the logging setup used by the demo binary.

// Core modules
mod errors;
mod helpers;

// Feature modules
pub mod engine;
pub mod infra;

// Re-exports
pub use engine::config::{EngineConfig, PulseConfig};
pub use engine::controller::DashboardController;
pub use engine::metrics::{derive_metrics, Confidence, DerivedMetrics};
pub use engine::noise::{NoiseSource, ScriptedNoise, ThreadRngNoise};
pub use engine::projection::{project, RenderFrame};
pub use engine::pulse::{MicroPulse, PointerTracker, PulseField};
pub use engine::regime::{Regime, RegimeState, SurfaceVariant};
pub use engine::runtime::{DashboardEngine, EngineHandle};
pub use engine::snapshot::DashboardSnapshot;
pub use errors::EngineError;
pub use helpers::{px_to_pct, round_to_dp};
pub use infra::logging::{init_logging, LogConfig, LogFormat};
