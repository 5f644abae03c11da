// event.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use gstreamer::prelude::*;
use gstreamer::{self as gst};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No pending state (only meaningful as the pending half of a transition)
    VoidPending,
    Null,
    Ready,
    Paused,
    Playing,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::VoidPending => write!(f, "VOID_PENDING"),
            PipelineState::Null => write!(f, "NULL"),
            PipelineState::Ready => write!(f, "READY"),
            PipelineState::Paused => write!(f, "PAUSED"),
            PipelineState::Playing => write!(f, "PLAYING"),
        }
    }
}

impl From<gst::State> for PipelineState {
    fn from(state: gst::State) -> Self {
        match state {
            gst::State::VoidPending => PipelineState::VoidPending,
            gst::State::Null => PipelineState::Null,
            gst::State::Ready => PipelineState::Ready,
            gst::State::Paused => PipelineState::Paused,
            gst::State::Playing => PipelineState::Playing,
        }
    }
}

impl From<PipelineState> for gst::State {
    fn from(state: PipelineState) -> Self {
        match state {
            PipelineState::VoidPending => gst::State::VoidPending,
            PipelineState::Null => gst::State::Null,
            PipelineState::Ready => gst::State::Ready,
            PipelineState::Paused => gst::State::Paused,
            PipelineState::Playing => gst::State::Playing,
        }
    }
}

/// Bus notifications the player reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    StateChanged {
        old: PipelineState,
        new: PipelineState,
        /// `None` when no further transition is queued
        pending: Option<PipelineState>,
    },
    Error {
        source: String,
        message: String,
        debug: Option<String>,
    },
    EndOfStream,
    Buffering {
        percent: i32,
    },
}

impl PlayerEvent {
    /// Convert a bus message into an event.
    ///
    /// Returns `None` for message types the player does not subscribe to.
    pub fn from_message(msg: &gst::Message) -> Option<Self> {
        match msg.view() {
            gst::MessageView::StateChanged(state_changed) => {
                let pending = match state_changed.pending() {
                    gst::State::VoidPending => None,
                    state => Some(PipelineState::from(state)),
                };
                Some(PlayerEvent::StateChanged {
                    old: PipelineState::from(state_changed.old()),
                    new: PipelineState::from(state_changed.current()),
                    pending,
                })
            }
            gst::MessageView::Error(err) => Some(PlayerEvent::Error {
                source: msg
                    .src()
                    .map(|src| src.name().to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.error().message().to_string(),
                debug: err.debug().map(|d| d.to_string()),
            }),
            gst::MessageView::Eos(_) => Some(PlayerEvent::EndOfStream),
            gst::MessageView::Buffering(buffering) => Some(PlayerEvent::Buffering {
                percent: buffering.percent(),
            }),
            _ => None,
        }
    }
}

/// Why the playback loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    Error,
    /// Error caused by missing codec or format support
    Unsupported,
    /// Stop requested from outside the loop (signal)
    Interrupted,
}

impl StopReason {
    pub fn exit_code(&self) -> i32 {
        match self {
            StopReason::EndOfStream | StopReason::Interrupted => 0,
            StopReason::Error => super::EXIT_CODE_ERROR,
            StopReason::Unsupported => super::EXIT_CODE_UNSUPPORTED,
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::EndOfStream => write!(f, "end of stream"),
            StopReason::Error => write!(f, "error"),
            StopReason::Unsupported => write!(f, "unsupported media"),
            StopReason::Interrupted => write!(f, "interrupted"),
        }
    }
}
