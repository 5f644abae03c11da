// pipeline.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use std::path::Path;

use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{GplayError, Result};
use crate::gst::bus::BusEventSource;
use crate::gst::event::PipelineState;

/// Element factory used to build the whole playback graph
pub const PLAYBIN_FACTORY: &str = "playbin";

/// Name given to the playbin instance
pub const PIPELINE_NAME: &str = "player";

/// Maximum length for URIs to prevent memory exhaustion
pub const MAX_URI_LENGTH: usize = 64 * 1024; // 64KB

/// Initialize GStreamer. Safe to call more than once.
pub fn init() -> Result<()> {
    gst::init().map_err(|e| GplayError::Initialization(e.to_string()))
}

/// Check if a string starts with an RFC 3986 scheme followed by ':'.
///
/// Single letter schemes are rejected so that Windows drive letters
/// (`C:\media\clip.mkv`) are treated as paths.
pub fn has_uri_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    scheme.len() > 1
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

/// Turn user input into something playbin accepts.
///
/// Inputs with a scheme are returned unchanged; anything else is treated as
/// a local path and converted to a `file://` URI.
pub fn resolve_uri(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GplayError::InvalidUri("URI cannot be empty".to_string()));
    }

    if has_uri_scheme(trimmed) {
        return Ok(trimmed.to_string());
    }

    let path = Path::new(trimmed);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let uri = gst::glib::filename_to_uri(&absolute, None)
        .map_err(|e| GplayError::InvalidUri(format!("{}: {}", absolute.display(), e)))?;
    debug!("Resolved path '{}' to '{}'", trimmed, uri);

    Ok(uri.to_string())
}

/// Owner of the single playbin element.
///
/// The element is reset to `Null` exactly once: either by [`Pipeline::teardown`]
/// or, on early exit paths, when the value is dropped.
pub struct Pipeline {
    uri: String,
    element: gst::Element,
    released: bool,
}

impl Pipeline {
    /// Build a playbin for `uri`. The returned pipeline is in the `Null` state.
    pub fn configure(uri: &str) -> Result<Self> {
        init()?;

        let trimmed = uri.trim();
        if trimmed.is_empty() {
            return Err(GplayError::InvalidUri("URI cannot be empty".to_string()));
        }

        if uri.len() > MAX_URI_LENGTH {
            return Err(GplayError::InvalidUri(format!(
                "URI too long: {} bytes (max: {} bytes)",
                uri.len(),
                MAX_URI_LENGTH
            )));
        }

        let element = gst::ElementFactory::make(PLAYBIN_FACTORY)
            .name(PIPELINE_NAME)
            .property("uri", trimmed)
            .build()
            .map_err(|e| {
                debug!("Failed to create '{}': {}", PLAYBIN_FACTORY, e);
                GplayError::ElementCreation(PLAYBIN_FACTORY.to_string())
            })?;

        info!("Configured pipeline '{}' for {}", PIPELINE_NAME, trimmed);

        Ok(Self {
            uri: trimmed.to_string(),
            element,
            released: false,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// URI as currently set on the element
    pub fn element_uri(&self) -> Option<String> {
        self.element.property::<Option<String>>("uri")
    }

    pub fn element(&self) -> &gst::Element {
        &self.element
    }

    pub fn bus(&self) -> Option<gst::Bus> {
        self.element.bus()
    }

    /// Attach an event source to this pipeline's bus
    pub fn event_source(&self) -> Result<BusEventSource> {
        let bus = self
            .bus()
            .ok_or_else(|| GplayError::GStreamer("Pipeline has no bus".to_string()))?;
        Ok(BusEventSource::new(bus, &self.element))
    }

    pub fn state(&self) -> PipelineState {
        let (_result, current, _pending) = self.element.state(gst::ClockTime::ZERO);
        PipelineState::from(current)
    }

    /// Target of an in-flight asynchronous transition, if any
    pub fn pending_state(&self) -> Option<PipelineState> {
        let (_result, _current, pending) = self.element.state(gst::ClockTime::ZERO);
        match pending {
            gst::State::VoidPending => None,
            state => Some(PipelineState::from(state)),
        }
    }

    fn set_state(&self, state: PipelineState) -> Result<()> {
        let gst_state: gst::State = state.into();
        let success = self.element.set_state(gst_state).map_err(|e| {
            debug!("set_state({}) on '{}' failed: {}", state, PIPELINE_NAME, e);
            GplayError::StateChange(state.to_string().to_lowercase())
        })?;

        match success {
            gst::StateChangeSuccess::Success | gst::StateChangeSuccess::NoPreroll => {
                info!("Pipeline '{}' state set to {}", PIPELINE_NAME, state);
            }
            gst::StateChangeSuccess::Async => {
                info!(
                    "Pipeline '{}' state change to {} in progress",
                    PIPELINE_NAME, state
                );
            }
        }

        Ok(())
    }

    /// Request the `Playing` state. Asynchronous transitions count as success.
    pub fn start(&self) -> Result<()> {
        self.set_state(PipelineState::Playing)
    }

    /// Request the `Null` state without releasing the element
    pub fn stop(&self) -> Result<()> {
        self.set_state(PipelineState::Null)
    }

    /// Reset to `Null` and release the element.
    ///
    /// Must only run after the playback loop has returned.
    pub fn teardown(mut self) -> Result<()> {
        self.released = true;
        let result = self.stop();
        debug!("Released pipeline '{}'", PIPELINE_NAME);
        result
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        debug!("Dropping pipeline '{}' without teardown", PIPELINE_NAME);
        if let Err(e) = self.element.set_state(gst::State::Null) {
            warn!("Failed to reset pipeline '{}': {}", PIPELINE_NAME, e);
        }
    }
}
