// main_loop.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::BUS_POLL_INTERVAL_MS;
use crate::error::{GplayError, Result};
use crate::gst::bus::EventSource;
use crate::gst::dispatcher::Dispatcher;
use crate::gst::event::StopReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopState::Idle => write!(f, "idle"),
            LoopState::Running => write!(f, "running"),
            LoopState::Stopped => write!(f, "stopped"),
        }
    }
}

struct Shared {
    state: LoopState,
    stop_reason: Option<StopReason>,
}

/// Cloneable handle used to stop a [`PlaybackLoop`] from any thread.
#[derive(Clone)]
pub struct LoopHandle {
    shared: Arc<Mutex<Shared>>,
}

impl LoopHandle {
    /// Ask the loop to stop. The first reason wins; later requests are ignored.
    ///
    /// A request made before `run()` makes `run()` return immediately.
    pub fn request_stop(&self, reason: StopReason) {
        let mut shared = self.shared.lock();
        if shared.stop_reason.is_some() {
            debug!("Stop already requested, ignoring {}", reason);
            return;
        }

        debug!("Stop requested ({}) while {}", reason, shared.state);
        shared.stop_reason = Some(reason);
        if shared.state == LoopState::Running {
            shared.state = LoopState::Stopped;
        }
    }

    pub fn state(&self) -> LoopState {
        self.shared.lock().state
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.shared.lock().stop_reason
    }
}

/// Blocking event loop: `Idle -> Running -> Stopped`, single use.
pub struct PlaybackLoop {
    handle: LoopHandle,
    poll_interval: Duration,
}

impl Default for PlaybackLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackLoop {
    pub fn new() -> Self {
        Self::with_poll_interval(Duration::from_millis(BUS_POLL_INTERVAL_MS))
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            handle: LoopHandle {
                shared: Arc::new(Mutex::new(Shared {
                    state: LoopState::Idle,
                    stop_reason: None,
                })),
            },
            poll_interval,
        }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> LoopState {
        self.handle.state()
    }

    /// Pull events from `source` and hand them to `dispatcher` one at a time,
    /// in arrival order, until a stop is requested.
    pub fn run<S, O, E>(
        &self,
        source: &mut S,
        dispatcher: &mut Dispatcher<'_, O, E>,
    ) -> Result<StopReason>
    where
        S: EventSource + ?Sized,
        O: Write,
        E: Write,
    {
        {
            let mut shared = self.handle.shared.lock();
            if shared.state != LoopState::Idle {
                return Err(GplayError::Loop(format!(
                    "loop cannot run while {}",
                    shared.state
                )));
            }

            if let Some(reason) = shared.stop_reason {
                shared.state = LoopState::Stopped;
                info!("Loop stopped before running ({})", reason);
                return Ok(reason);
            }

            shared.state = LoopState::Running;
        }

        debug!("Playback loop running");

        loop {
            if let Some(reason) = self.stopped() {
                info!("Playback loop stopped ({})", reason);
                return Ok(reason);
            }

            let Some(event) = source.next_event(self.poll_interval) else {
                continue;
            };

            if let Some(reason) = dispatcher.dispatch(&event) {
                self.handle.request_stop(reason);
            }
        }
    }

    fn stopped(&self) -> Option<StopReason> {
        let shared = self.handle.shared.lock();
        match shared.state {
            LoopState::Stopped => shared.stop_reason,
            _ => None,
        }
    }
}
