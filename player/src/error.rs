// error.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GplayError {
    #[error("Failed to initialize GStreamer: {0}")]
    Initialization(String),

    #[error("Not all elements could be created. '{0}' missing?")]
    ElementCreation(String),

    #[error("Unable to set the pipeline to the {0} state.")]
    StateChange(String),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("GStreamer error: {0}")]
    GStreamer(String),

    #[error("Event loop error: {0}")]
    Loop(String),

    #[error("Playback task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GplayError>;
