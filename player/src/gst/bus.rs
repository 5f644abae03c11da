// bus.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::trace;

use crate::gst::event::PlayerEvent;

/// Message types the player subscribes to
pub const SUBSCRIBED_MESSAGES: [gst::MessageType; 4] = [
    gst::MessageType::StateChanged,
    gst::MessageType::Error,
    gst::MessageType::Eos,
    gst::MessageType::Buffering,
];

/// Anything the playback loop can pull events from.
pub trait EventSource {
    /// Wait up to `timeout` for the next event.
    fn next_event(&mut self, timeout: Duration) -> Option<PlayerEvent>;
}

/// Event source backed by a pipeline bus.
///
/// Only keeps a weak reference to the pipeline, which stays owned by
/// [`crate::gst::Pipeline`].
pub struct BusEventSource {
    bus: gst::Bus,
    pipeline: gst::glib::WeakRef<gst::Element>,
}

impl BusEventSource {
    pub fn new(bus: gst::Bus, pipeline: &gst::Element) -> Self {
        Self {
            bus,
            pipeline: pipeline.downgrade(),
        }
    }

    /// State changes of playbin's internal elements are not reported.
    fn is_from_pipeline(&self, msg: &gst::Message) -> bool {
        match (msg.src(), self.pipeline.upgrade()) {
            (Some(src), Some(pipeline)) => src == pipeline.upcast_ref::<gst::Object>(),
            _ => false,
        }
    }
}

impl EventSource for BusEventSource {
    fn next_event(&mut self, timeout: Duration) -> Option<PlayerEvent> {
        let timeout = gst::ClockTime::from_nseconds(timeout.as_nanos() as u64);
        let msg = self.bus.timed_pop_filtered(timeout, &SUBSCRIBED_MESSAGES)?;

        if let gst::MessageView::StateChanged(_) = msg.view() {
            if !self.is_from_pipeline(&msg) {
                trace!(
                    "Ignoring state change from child '{}'",
                    msg.src().map(|s| s.name().to_string()).unwrap_or_default()
                );
                return None;
            }
        }

        PlayerEvent::from_message(&msg)
    }
}
