// ABOUTME: Hand-chicken CLI - offline motion trace replay, calibration, and threshold management
// ABOUTME: Uses the same engine and threshold storage as the exercise session runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Classify a recorded trace
//! hand-chicken-cli replay --trace walk.json
//!
//! # Calibrate walking thresholds from a trace and persist them
//! hand-chicken-cli calibrate --label walking --trace walk.json --apply --save
//!
//! # Inspect or edit persisted thresholds
//! hand-chicken-cli thresholds show
//! hand-chicken-cli thresholds set stepThreshold 1.4
//! hand-chicken-cli thresholds reset
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use hand_chicken::config::{AppConfig, ThresholdField};
use hand_chicken::errors::{AppError, AppResult};
use hand_chicken::logging::LoggingConfig;
use hand_chicken::models::ActivityLabel;
use hand_chicken::storage::{FileStore, ThresholdRepository};
use std::path::PathBuf;
use tracing::info;

use commands::calibrate::CalibrateOptions;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "hand-chicken-cli",
    about = "Hand-chicken motion classifier tools",
    long_about = "Replay recorded accelerometer traces, calibrate detection thresholds, and manage persisted thresholds."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Storage directory override
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Classify a recorded motion trace
    Replay {
        /// JSON trace file
        #[arg(long)]
        trace: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive thresholds from a labeled motion trace
    Calibrate {
        /// Activity recorded in the trace (walking or jumping)
        #[arg(long)]
        label: ActivityLabel,

        /// JSON trace file
        #[arg(long)]
        trace: PathBuf,

        /// Apply the recommendation to the persisted thresholds
        #[arg(long)]
        apply: bool,

        /// Save the applied thresholds
        #[arg(long, requires = "apply")]
        save: bool,
    },

    /// Persisted threshold management
    Thresholds {
        #[command(subcommand)]
        action: ThresholdCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ThresholdCommand {
    /// Show the persisted thresholds
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set one threshold field
    Set {
        /// Field name, e.g. `stepThreshold` or `min_step_interval_ms`
        field: ThresholdField,

        /// New value
        value: f64,
    },

    /// Delete the persisted thresholds
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose)
        .init()
        .map_err(|e| AppError::internal(format!("failed to initialize logging: {e}")))?;

    let mut config = AppConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    info!(data_dir = %config.data_dir.display(), "using threshold storage");
    let repository = ThresholdRepository::new(FileStore::new(&config.data_dir));

    match cli.command {
        Command::Replay { trace, json } => {
            let thresholds = repository.load().await;
            commands::replay::run(&trace, &thresholds, config.engine, json).await?;
        }
        Command::Calibrate {
            label,
            trace,
            apply,
            save,
        } => {
            let options = CalibrateOptions {
                label,
                trace: &trace,
                apply,
                save,
            };
            commands::calibrate::run(options, &repository, config.engine).await?;
        }
        Command::Thresholds { action } => match action {
            ThresholdCommand::Show { json } => {
                commands::thresholds::show(&repository, json).await?;
            }
            ThresholdCommand::Set { field, value } => {
                commands::thresholds::set(&repository, field, value).await?;
            }
            ThresholdCommand::Reset => {
                commands::thresholds::reset(&repository).await?;
            }
        },
    }

    Ok(())
}
