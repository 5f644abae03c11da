// context.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

/// Where the player body runs.
///
/// Some hosts reserve the primary thread for their own event pump; an
/// implementation for such a host runs `f` elsewhere while it keeps that
/// pump alive.
pub trait ExecutionContext {
    fn run_on_designated_context<T, F>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send;
}

/// Runs `f` directly on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentThread;

impl ExecutionContext for CurrentThread {
    fn run_on_designated_context<T, F>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        f()
    }
}

/// Keeps the main thread for the Cocoa run loop video sinks need and runs
/// `f` on a secondary thread.
#[cfg(target_os = "macos")]
#[derive(Debug, Default, Clone, Copy)]
pub struct MacosMain;

#[cfg(target_os = "macos")]
impl ExecutionContext for MacosMain {
    fn run_on_designated_context<T, F>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        gstreamer::macos_main(f)
    }
}

#[cfg(target_os = "macos")]
pub fn platform_context() -> MacosMain {
    MacosMain
}

#[cfg(not(target_os = "macos"))]
pub fn platform_context() -> CurrentThread {
    CurrentThread
}
