// dispatcher.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use std::io::{self, Write};

use tracing::{debug, error, info, warn};

use crate::console::Console;
use crate::gst::event::{PipelineState, PlayerEvent, StopReason};

/// Check if an error message indicates unsupported media (missing codec, format, etc.)
pub fn is_media_not_supported_error(message: &str) -> bool {
    let msg_lower = message.to_lowercase();

    // Patterns GStreamer uses for missing codecs, unsupported formats
    // and hardware limitations
    let media_patterns = [
        "no suitable",
        "missing plugin",
        "missing element",
        "codec not found",
        "could not determine type",
        "unhandled",
        "not supported",
        "unsupported",
        "no decoder",
        "no demuxer",
        "format not supported",
        "caps not supported",
        "not negotiated",
        "stream type not supported",
    ];

    media_patterns
        .iter()
        .any(|pattern| msg_lower.contains(pattern))
}

/// Routes each event to its handler and reports whether the loop must stop.
pub struct Dispatcher<'a, O: Write, E: Write> {
    console: &'a mut Console<O, E>,
}

impl<'a, O: Write, E: Write> Dispatcher<'a, O, E> {
    pub fn new(console: &'a mut Console<O, E>) -> Self {
        Self { console }
    }

    /// Handle one event. Console output is best effort: a failed write never
    /// changes whether the loop stops.
    pub fn dispatch(&mut self, event: &PlayerEvent) -> Option<StopReason> {
        match event {
            PlayerEvent::StateChanged { old, new, pending } => {
                report_write("state change", self.on_state_changed(*old, *new, *pending));
                None
            }
            PlayerEvent::Error {
                source,
                message,
                debug,
            } => Some(self.on_error(source, message, debug.as_deref())),
            PlayerEvent::EndOfStream => Some(self.on_eos()),
            PlayerEvent::Buffering { percent } => {
                report_write("buffering", self.on_buffering(*percent));
                None
            }
        }
    }

    fn on_state_changed(
        &mut self,
        old: PipelineState,
        new: PipelineState,
        pending: Option<PipelineState>,
    ) -> io::Result<()> {
        debug!("State changed: {} -> {} (pending: {:?})", old, new, pending);
        self.console
            .line(&format!("State changed from {} to {}", old, new))
    }

    fn on_error(&mut self, source: &str, message: &str, debug: Option<&str>) -> StopReason {
        let reason = if is_media_not_supported_error(message) {
            warn!("Unsupported media reported by '{}': {}", source, message);
            StopReason::Unsupported
        } else {
            error!("Playback error from '{}': {}", source, message);
            StopReason::Error
        };

        report_write(
            "error",
            self.console
                .error(&format!(
                    "Error received from element {}: {}",
                    source, message
                ))
                .and_then(|_| {
                    self.console.error(&format!(
                        "Debugging information: {}",
                        debug.unwrap_or("none")
                    ))
                }),
        );

        reason
    }

    fn on_eos(&mut self) -> StopReason {
        info!("Pipeline reached end of stream");
        report_write("end of stream", self.console.line("End of stream reached."));
        StopReason::EndOfStream
    }

    fn on_buffering(&mut self, percent: i32) -> io::Result<()> {
        self.console.progress(&format!("Buffering: {}%", percent))
    }
}

fn report_write(what: &str, result: io::Result<()>) {
    if let Err(e) = result {
        warn!("Failed to print {} notification: {}", what, e);
    }
}
