// player.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use std::io::Write;

use tracing::{info, warn};

use crate::console::Console;
use crate::error::Result;
use crate::gst::{Dispatcher, Pipeline, PlaybackLoop, StopReason};

/// Public HLS test stream (Big Buck Bunny)
pub const DEFAULT_URI: &str = "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8";

/// Play `uri` until end of stream, a playback error or an external stop.
///
/// The pipeline is always released before this returns, on every path.
pub fn play<O: Write, E: Write>(
    uri: &str,
    main_loop: &PlaybackLoop,
    console: &mut Console<O, E>,
) -> Result<StopReason> {
    console.line("Initializing GStreamer Player...")?;

    let pipeline = Pipeline::configure(uri)?;
    console.line(&format!("Setting URI to: {}", pipeline.uri()))?;

    let mut source = pipeline.event_source()?;

    console.line("Starting playback...")?;
    // On failure `pipeline` is dropped here, which resets it to Null
    pipeline.start()?;

    let result = {
        let mut dispatcher = Dispatcher::new(console);
        main_loop.run(&mut source, &mut dispatcher)
    };

    if let Err(e) = console.line("\nStopping playback and cleaning up...") {
        warn!("Failed to print shutdown banner: {}", e);
    }
    if let Err(e) = pipeline.teardown() {
        warn!("Teardown failed: {}", e);
    }

    let reason = result?;
    info!("Playback finished: {}", reason);
    Ok(reason)
}
