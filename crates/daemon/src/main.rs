// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DinnaFind geofence daemon (dfd)
//!
//! Hosts the geofence engine for a client that speaks JSON lines over
//! stdin/stdout: the client reports bucket list changes and position
//! fixes, dfd answers with proximity notifications.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod lifecycle;
mod protocol;

use std::path::PathBuf;

use df_engine::SyncStatus;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

use crate::lifecycle::{Config, DaemonState, LifecycleError};
use crate::protocol::Output;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse arguments: dfd [--desktop] [STATE_DIR]
    let mut state_dir = None;
    let mut desktop = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--desktop" => desktop = true,
            other => state_dir = Some(PathBuf::from(other)),
        }
    }

    // Load configuration
    let config = Config::load(state_dir, desktop)?;

    // Write startup marker to log (before tracing setup)
    write_startup_marker(&config)?;

    // Set up logging
    let log_guard = setup_logging(&config)?;

    info!("Starting dfd in {}", config.state_dir.display());

    // Start daemon
    let mut daemon = match lifecycle::startup(&config).await {
        Ok(d) => d,
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            write_startup_error(&config, &e);
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!(regions = daemon.restored, "Daemon ready");
    emit(
        &mut stdout,
        &Output::Ready {
            regions: daemon.restored,
        },
    )
    .await?;

    // Main event loop
    loop {
        tokio::select! {
            // Requests from the host
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        let output = match protocol::decode(&line) {
                            Ok(request) => daemon.handle_request(request).await,
                            Err(e) => {
                                warn!("Rejected request: {}", e);
                                Some(Output::error(e.to_string()))
                            }
                        };
                        if let Some(output) = output {
                            emit(&mut stdout, &output).await?;
                        }
                    }
                    Ok(None) => {
                        info!("Input closed, shutting down...");
                        break;
                    }
                    Err(e) => {
                        error!("Error reading input: {}", e);
                        break;
                    }
                }
            }

            // Region crossings from the position feed
            Some(transition) = daemon.transitions.recv() => {
                daemon.handle_transition(transition).await;
            }

            // Notifications ready for the host
            Some(notification) = daemon.notifications.recv() => {
                emit(&mut stdout, &Output::Notification(notification)).await?;
            }

            // Resync outcomes; permission problems must reach the user
            Ok(()) = daemon.sync_status.changed() => {
                report_status(&daemon, &mut stdout).await?;
            }

            // Graceful shutdown on SIGTERM
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }

            // Graceful shutdown on SIGINT
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
        }

        // Check if shutdown was requested by the host
        if daemon.shutdown_requested {
            info!("Shutdown requested, shutting down...");
            break;
        }
    }

    daemon.shutdown().await;
    drain(&mut daemon, &mut stdout).await?;

    info!("Daemon stopped");
    Ok(())
}

/// Deliver work queued before shutdown
async fn drain(daemon: &mut DaemonState, stdout: &mut Stdout) -> Result<(), LifecycleError> {
    while let Ok(transition) = daemon.transitions.try_recv() {
        daemon.handle_transition(transition).await;
    }
    while let Ok(notification) = daemon.notifications.try_recv() {
        emit(stdout, &Output::Notification(notification)).await?;
    }
    Ok(())
}

async fn report_status(daemon: &DaemonState, stdout: &mut Stdout) -> Result<(), LifecycleError> {
    let status = daemon.current_status();
    if let SyncStatus::PermissionDenied(permission) = &status {
        emit(
            stdout,
            &Output::error(format!("{} permission not granted", permission)),
        )
        .await?;
    }
    let output = daemon.status_output(&status).await;
    emit(stdout, &output).await
}

/// Write one output line and flush it
async fn emit(stdout: &mut Stdout, output: &Output) -> Result<(), LifecycleError> {
    let line = match protocol::encode(output) {
        Ok(line) => line,
        Err(e) => {
            error!("{}", e);
            return Ok(());
        }
    };
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

/// Startup marker prefix written to log before anything else.
/// Full format: "--- dfd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- dfd: starting (pid: ";

/// Write startup marker to log file (appends to existing log)
fn write_startup_marker(config: &Config) -> Result<(), LifecycleError> {
    use std::io::Write;

    // Create log directory if needed
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Append marker to log file with PID
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;

    Ok(())
}

/// Write startup error synchronously to log file.
fn write_startup_error(config: &Config, error: &LifecycleError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Set up file appender
    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        config
            .log_path
            .file_name()
            .ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Set up subscriber with env filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
