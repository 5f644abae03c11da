// lib.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod console;
pub mod context;
pub mod error;
pub mod gst;
pub mod player;

pub use console::Console;
pub use error::{GplayError, Result};
pub use gst::{LoopHandle, PlaybackLoop, PlayerEvent, StopReason};
pub use player::{play, DEFAULT_URI};
