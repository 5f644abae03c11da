// mod.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod bus;
pub mod dispatcher;
pub mod event;
pub mod main_loop;
pub mod pipeline;

pub use bus::{BusEventSource, EventSource};
pub use dispatcher::Dispatcher;
pub use event::{PipelineState, PlayerEvent, StopReason};
pub use main_loop::{LoopHandle, LoopState, PlaybackLoop};
pub use pipeline::Pipeline;

/// How long the loop waits on the bus before re-checking for a stop request
pub const BUS_POLL_INTERVAL_MS: u64 = 100;

// Exit codes matching GStreamer convention (gst-launch MR !10088)
pub const EXIT_CODE_ERROR: i32 = 1;
pub const EXIT_CODE_UNSUPPORTED: i32 = 69; // EX_UNAVAILABLE



#[cfg(test)]
mod main_loop_tests;
