//! Tokio runtime layer: the engine task and its handle.
//!
//! The controller is single-owner state, so the engine runs it inside one
//! task: inbound operations arrive over an mpsc channel and the two periodic
//! cadences (spawn check, expiry sweep) are `tokio::time::interval`s
//! multiplexed with the channel in a `select!` loop. Each select arm runs to
//! completion before the next fires, which is exactly the serialization the
//! pulse collection needs.
//!
//! Teardown is explicit: `EngineHandle::shutdown` (or dropping the handle,
//! which closes the channel) ends the loop, and both intervals die with the
//! task. No timer callback can ever touch state after teardown.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::{debug, info, warn};

use super::config::EngineConfig;
use super::controller::DashboardController;
use super::noise::NoiseSource;
use super::regime::{Regime, SurfaceVariant};
use super::snapshot::DashboardSnapshot;
use crate::errors::EngineError;

/// Command channel depth. Pointer moves can burst; snapshots are paced by
/// the render loop, so a small buffer suffices.
const COMMAND_BUFFER: usize = 64;

enum Command {
    PointerMove { x: f64, y: f64 },
    SelectRegime(Regime),
    SetProgression(f64),
    Resize { width: f64, height: f64 },
    Snapshot(oneshot::Sender<DashboardSnapshot>),
    Shutdown,
}

/// Handle to a running engine task. Cloneable; all clones feed the same
/// controller. Dropping every handle tears the engine down.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Command>,
}

impl EngineHandle {
    pub async fn pointer_move(&self, x: f64, y: f64) -> Result<(), EngineError> {
        self.send(Command::PointerMove { x, y }).await
    }

    pub async fn select_regime(&self, target: Regime) -> Result<(), EngineError> {
        self.send(Command::SelectRegime(target)).await
    }

    pub async fn set_progression(&self, value: f64) -> Result<(), EngineError> {
        self.send(Command::SetProgression(value)).await
    }

    pub async fn resize(&self, width: f64, height: f64) -> Result<(), EngineError> {
        self.send(Command::Resize { width, height }).await
    }

    /// Capture a render snapshot.
    pub async fn snapshot(&self) -> Result<DashboardSnapshot, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await
            .map_err(|_| EngineError::Stopped("snapshot dropped"))
    }

    /// Request shutdown. Idempotent; any handle may call it.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| EngineError::Stopped("command channel closed"))
    }
}

/// The engine task: owns the controller and the two periodic cadences.
pub struct DashboardEngine {
    controller: DashboardController,
    config: EngineConfig,
    rx: mpsc::Receiver<Command>,
    started: Instant,
}

impl DashboardEngine {
    /// Spawn the engine task. Returns the command handle and the task's
    /// join handle (await it after `shutdown` for a clean teardown).
    pub fn spawn(
        config: EngineConfig,
        variant: SurfaceVariant,
        noise: Box<dyn NoiseSource>,
    ) -> (EngineHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let engine = DashboardEngine {
            controller: DashboardController::new(config.clone(), variant, noise),
            config,
            rx,
            started: Instant::now(),
        };
        let task = tokio::spawn(engine.run());
        (EngineHandle { tx }, task)
    }

    async fn run(mut self) {
        let mut spawn_check = interval(Duration::from_millis(self.config.pulse.spawn_check_ms));
        let mut expiry_sweep = interval(Duration::from_millis(self.config.pulse.expiry_sweep_ms));
        // Skip the immediate first tick of each interval.
        spawn_check.tick().await;
        expiry_sweep.tick().await;

        info!(
            target: "alpha_weather::engine",
            spawn_check_ms = self.config.pulse.spawn_check_ms,
            expiry_sweep_ms = self.config.pulse.expiry_sweep_ms,
            "engine task started"
        );

        loop {
            tokio::select! {
                command = self.rx.recv() => {
                    match command {
                        Some(command) => {
                            if !self.handle(command) {
                                break;
                            }
                        }
                        // All handles dropped: tear down.
                        None => break,
                    }
                }
                _ = spawn_check.tick() => {
                    let now_ms = self.now_ms();
                    self.controller.spawn_tick(now_ms);
                }
                _ = expiry_sweep.tick() => {
                    let now_ms = self.now_ms();
                    self.controller.sweep_tick(now_ms);
                }
            }
        }

        // Intervals drop here with the task: no pending timer can fire into
        // torn-down state.
        info!(target: "alpha_weather::engine", "engine task stopped, timers cancelled");
    }

    /// Apply one command. Returns false when the loop should stop.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::PointerMove { x, y } => {
                let now_ms = self.now_ms();
                self.controller.pointer_move(x, y, now_ms);
            }
            Command::SelectRegime(target) => self.controller.select_regime(target),
            Command::SetProgression(value) => self.controller.set_progression(value),
            Command::Resize { width, height } => self.controller.resize(width, height),
            Command::Snapshot(reply) => {
                if reply.send(self.controller.snapshot()).is_err() {
                    warn!(target: "alpha_weather::engine", "snapshot requester went away");
                }
            }
            Command::Shutdown => {
                debug!(target: "alpha_weather::engine", "shutdown requested");
                return false;
            }
        }
        true
    }

    /// Milliseconds since engine start, on the tokio clock (pausable in
    /// tests).
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
