//! Alpha Weather demo dashboard driver.
//!
//! Runs the simulation engine headless with a scripted interaction (pointer
//! wiggle, dwell, regime jumps, slider drags) and prints a render snapshot
//! per second. Useful for eyeballing the regime narrative and pulse activity
//! without a UI host:
//!
//! ```bash
//! RUST_LOG=info,alpha_weather::pulse=debug cargo run --bin dashboard -- --seconds 20
//! ```

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::info;

use alpha_weather::{
    init_logging, project, DashboardEngine, EngineConfig, EngineHandle, LogConfig, Regime,
    SurfaceVariant, ThreadRngNoise,
};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(version, about = "Alpha Weather demo dashboard (headless)", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "dashboard.toml")]
    config: String,

    /// How long to run the scripted session
    #[arg(long, default_value_t = 12)]
    seconds: u64,

    /// Start on the minimal landing surface instead of the dashboard
    #[arg(long)]
    minimal: bool,

    /// Print full render frames as JSON instead of one-line summaries
    #[arg(long)]
    frames: bool,

    /// Override log level from config
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
struct AppConfig {
    #[serde(default)]
    engine: EngineConfig,
    #[serde(default)]
    logging: LogConfig,
}

fn load_config(cli: &Cli) -> Result<AppConfig, Box<dyn std::error::Error + Send + Sync>> {
    let config_path = &cli.config;
    if Path::new(config_path).exists() {
        let content = std::fs::read_to_string(config_path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    } else {
        Ok(AppConfig::default())
    }
}

/// One scripted second of interaction: wiggle the pointer early, then dwell,
/// with a couple of regime jumps and slider drags along the way.
async fn scripted_step(handle: &EngineHandle, second: u64) -> Result<(), alpha_weather::EngineError> {
    match second {
        0..=2 => {
            // Wiggle: resets the idle clock, so nothing spawns yet.
            let x = 800.0 + (second as f64) * 40.0;
            handle.pointer_move(x, 450.0).await?;
        }
        3 => handle.select_regime(Regime::Mechanical).await?,
        6 => handle.set_progression(55.0).await?,
        9 => handle.set_progression(12.0).await?,
        _ => {} // Dwell: the pulse field does the talking.
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_logging(&config.logging)?;

    let variant = if cli.minimal {
        SurfaceVariant::Minimal
    } else {
        SurfaceVariant::Dashboard
    };
    let (handle, task) = DashboardEngine::spawn(config.engine, variant, Box::new(ThreadRngNoise));
    info!("demo session started ({variant:?}, {}s)", cli.seconds);

    for second in 0..cli.seconds {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, shutting down");
                break;
            }
            _ = sleep(Duration::from_secs(1)) => {}
        }

        scripted_step(&handle, second).await?;

        let snapshot = handle.snapshot().await?;
        if cli.frames {
            let frame = project(&snapshot);
            println!("{}", serde_json::to_string_pretty(&frame)?);
        } else {
            println!(
                "t={second:>3}s  {:<18} progression={:>5.1}  index={:>5.1}  {:?}  window={}  pulses={}",
                format!("{:?}", snapshot.regime),
                snapshot.progression,
                snapshot.index_value,
                snapshot.confidence,
                snapshot.window,
                snapshot.active_pulses.len(),
            );
        }
    }

    handle.shutdown().await?;
    task.await?;
    info!("demo session complete");
    Ok(())
}
