// main_loop_tests.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::VecDeque;
use std::time::Duration;

use super::bus::EventSource;
use super::dispatcher::Dispatcher;
use super::event::{PipelineState, PlayerEvent, StopReason};
use super::main_loop::*;
use crate::console::Console;
use crate::error::GplayError;

const POLL: Duration = Duration::from_millis(5);

/// Replays a fixed list of events, then requests an external stop once
/// drained so tests never block forever.
struct ScriptedSource {
    events: VecDeque<PlayerEvent>,
    handle: LoopHandle,
    delivered: usize,
}

impl ScriptedSource {
    fn new(events: Vec<PlayerEvent>, handle: LoopHandle) -> Self {
        Self {
            events: events.into(),
            handle,
            delivered: 0,
        }
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self, _timeout: Duration) -> Option<PlayerEvent> {
        match self.events.pop_front() {
            Some(event) => {
                self.delivered += 1;
                Some(event)
            }
            None => {
                self.handle.request_stop(StopReason::Interrupted);
                None
            }
        }
    }
}

/// Never produces anything
struct SilentSource;

impl EventSource for SilentSource {
    fn next_event(&mut self, timeout: Duration) -> Option<PlayerEvent> {
        std::thread::sleep(timeout);
        None
    }
}

/// Output that always fails, like stdout piped into a closed reader
struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }
}

fn run_script(events: Vec<PlayerEvent>) -> (StopReason, usize, String, String) {
    let main_loop = PlaybackLoop::with_poll_interval(POLL);
    let mut source = ScriptedSource::new(events, main_loop.handle());
    let mut console = Console::new(Vec::new(), Vec::new());

    let reason = {
        let mut dispatcher = Dispatcher::new(&mut console);
        main_loop.run(&mut source, &mut dispatcher).unwrap()
    };
    assert_eq!(main_loop.state(), LoopState::Stopped);

    let (out, err) = console.into_inner();
    (
        reason,
        source.delivered,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_new_loop_is_idle() {
    let main_loop = PlaybackLoop::new();
    assert_eq!(main_loop.state(), LoopState::Idle);
    assert!(main_loop.handle().stop_reason().is_none());
}

#[test]
fn test_eos_stops_loop() {
    let (reason, delivered, out, _) = run_script(vec![
        PlayerEvent::StateChanged {
            old: PipelineState::Paused,
            new: PipelineState::Playing,
            pending: None,
        },
        PlayerEvent::EndOfStream,
    ]);

    assert_eq!(reason, StopReason::EndOfStream);
    assert_eq!(delivered, 2);
    assert!(out.ends_with("End of stream reached.\n"));
}

#[test]
fn test_error_stops_loop_before_later_events() {
    let (reason, delivered, out, err) = run_script(vec![
        PlayerEvent::Buffering { percent: 10 },
        PlayerEvent::Error {
            source: "playbin".to_string(),
            message: "Resource not found.".to_string(),
            debug: None,
        },
        PlayerEvent::EndOfStream,
    ]);

    assert_eq!(reason, StopReason::Error);
    // EndOfStream after the error is never dispatched
    assert_eq!(delivered, 2);
    assert!(!out.contains("End of stream reached."));
    assert!(!err.is_empty());
}

#[test]
fn test_buffering_and_state_changes_never_stop_loop() {
    let (reason, delivered, out, _) = run_script(vec![
        PlayerEvent::Buffering { percent: 0 },
        PlayerEvent::StateChanged {
            old: PipelineState::Null,
            new: PipelineState::Ready,
            pending: Some(PipelineState::Playing),
        },
        PlayerEvent::Buffering { percent: 100 },
    ]);

    // Only the external stop issued by the drained source ends the loop
    assert_eq!(reason, StopReason::Interrupted);
    assert_eq!(delivered, 3);
    assert!(out.contains("Buffering: 0%\r"));
    assert!(out.contains("Buffering: 100%\r"));
}

#[test]
fn test_broken_stdout_does_not_stop_loop_early() {
    let main_loop = PlaybackLoop::with_poll_interval(POLL);
    let mut source = ScriptedSource::new(
        vec![
            PlayerEvent::Buffering { percent: 40 },
            PlayerEvent::StateChanged {
                old: PipelineState::Paused,
                new: PipelineState::Playing,
                pending: None,
            },
            PlayerEvent::EndOfStream,
        ],
        main_loop.handle(),
    );
    let mut console = Console::new(ClosedPipe, Vec::new());

    let reason = main_loop
        .run(&mut source, &mut Dispatcher::new(&mut console))
        .unwrap();

    assert_eq!(reason, StopReason::EndOfStream);
    assert_eq!(source.delivered, 3);
    assert_eq!(main_loop.state(), LoopState::Stopped);
}

#[test]
fn test_events_dispatched_in_arrival_order() {
    let (_, _, out, _) = run_script(vec![
        PlayerEvent::StateChanged {
            old: PipelineState::Null,
            new: PipelineState::Ready,
            pending: None,
        },
        PlayerEvent::StateChanged {
            old: PipelineState::Ready,
            new: PipelineState::Paused,
            pending: None,
        },
        PlayerEvent::StateChanged {
            old: PipelineState::Paused,
            new: PipelineState::Playing,
            pending: None,
        },
        PlayerEvent::EndOfStream,
    ]);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "State changed from NULL to READY",
            "State changed from READY to PAUSED",
            "State changed from PAUSED to PLAYING",
            "End of stream reached.",
        ]
    );
}

#[test]
fn test_stop_requested_while_idle_returns_immediately() {
    let main_loop = PlaybackLoop::with_poll_interval(POLL);
    main_loop.handle().request_stop(StopReason::Interrupted);
    assert_eq!(main_loop.state(), LoopState::Idle);

    let mut source = ScriptedSource::new(vec![PlayerEvent::EndOfStream], main_loop.handle());
    let mut console = Console::new(Vec::new(), Vec::new());
    let reason = main_loop
        .run(&mut source, &mut Dispatcher::new(&mut console))
        .unwrap();

    assert_eq!(reason, StopReason::Interrupted);
    assert_eq!(source.delivered, 0);
    assert_eq!(main_loop.state(), LoopState::Stopped);
}

#[test]
fn test_first_stop_reason_wins() {
    let main_loop = PlaybackLoop::new();
    let handle = main_loop.handle();
    handle.request_stop(StopReason::EndOfStream);
    handle.request_stop(StopReason::Error);
    assert_eq!(handle.stop_reason(), Some(StopReason::EndOfStream));
}

#[test]
fn test_loop_cannot_run_twice() {
    let main_loop = PlaybackLoop::with_poll_interval(POLL);
    let mut console = Console::new(Vec::new(), Vec::new());

    let mut source = ScriptedSource::new(vec![PlayerEvent::EndOfStream], main_loop.handle());
    main_loop
        .run(&mut source, &mut Dispatcher::new(&mut console))
        .unwrap();

    let mut source = ScriptedSource::new(vec![PlayerEvent::EndOfStream], main_loop.handle());
    let result = main_loop.run(&mut source, &mut Dispatcher::new(&mut console));
    assert!(matches!(result, Err(GplayError::Loop(_))));
    assert_eq!(source.delivered, 0);
}

#[test]
fn test_stop_from_another_thread() {
    let main_loop = PlaybackLoop::with_poll_interval(POLL);
    let handle = main_loop.handle();

    let stopper = std::thread::spawn(move || {
        while handle.state() != LoopState::Running {
            std::thread::sleep(Duration::from_millis(1));
        }
        handle.request_stop(StopReason::Interrupted);
    });

    let mut console = Console::new(Vec::new(), Vec::new());
    let reason = main_loop
        .run(&mut SilentSource, &mut Dispatcher::new(&mut console))
        .unwrap();
    stopper.join().unwrap();

    assert_eq!(reason, StopReason::Interrupted);
    assert_eq!(main_loop.state(), LoopState::Stopped);
}

#[test]
fn test_independent_loops() {
    let first = PlaybackLoop::new();
    let second = PlaybackLoop::new();
    first.handle().request_stop(StopReason::EndOfStream);

    assert_eq!(first.handle().stop_reason(), Some(StopReason::EndOfStream));
    assert!(second.handle().stop_reason().is_none());
}
