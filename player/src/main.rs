// main.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gplay::context::{platform_context, ExecutionContext};
use gplay::gst::pipeline::resolve_uri;
use gplay::gst::EXIT_CODE_ERROR;
use gplay::{Console, GplayError, PlaybackLoop, StopReason};

#[derive(Parser, Debug)]
#[command(name = "gplay")]
#[command(author = "Stéphane Cerveau")]
#[command(version)]
#[command(about = "GStreamer playbin command-line player")]
struct Args {
    /// Media URI or local file path to play
    #[arg(env = "GPLAY_URI", default_value = gplay::DEFAULT_URI)]
    uri: String,
}

/// SIGINT/SIGTERM (Ctrl+C off unix) listeners, registered before playback starts
struct ShutdownSignals {
    #[cfg(unix)]
    sigint: tokio::signal::unix::Signal,
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
}

impl ShutdownSignals {
    /// Must be called from within the tokio runtime
    fn register() -> std::io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            Ok(Self {
                sigint: signal(SignalKind::interrupt())?,
                sigterm: signal(SignalKind::terminate())?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    async fn recv(&mut self) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            tokio::select! {
                _ = self.sigint.recv() => info!("Received SIGINT"),
                _ = self.sigterm.recv() => info!("Received SIGTERM"),
            }
        }
        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await?;
            info!("Received Ctrl+C");
        }
        Ok(())
    }
}

fn run(args: Args) -> gplay::Result<StopReason> {
    let uri = resolve_uri(&args.uri)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut signals = ShutdownSignals::register()?;

        let main_loop = PlaybackLoop::new();
        let handle = main_loop.handle();

        // The loop blocks, keep it off the runtime thread so signals are still served
        let mut session = tokio::task::spawn_blocking(move || {
            let mut console = Console::stdio();
            gplay::play(&uri, &main_loop, &mut console)
        });

        let joined = tokio::select! {
            joined = &mut session => joined,
            signal = signals.recv() => {
                match signal {
                    Ok(()) => handle.request_stop(StopReason::Interrupted),
                    Err(e) => error!("Failed to listen for shutdown signals: {}", e),
                }
                session.await
            }
        };

        joined.map_err(|e| GplayError::Task(e.to_string()))?
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gplay=warn")),
        )
        .init();

    let args = Args::parse();

    let exit_code = platform_context().run_on_designated_context(move || match run(args) {
        Ok(reason) => {
            info!("Exiting after {}", reason);
            reason.exit_code()
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_CODE_ERROR
        }
    });

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
