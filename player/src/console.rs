// console.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPlay
//
// SPDX-License-Identifier: GPL-3.0-only

use std::io::{self, Write};

/// User facing output: progress on `out`, playback failures on `err`.
pub struct Console<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Console<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Rewrite the current line in place
    pub fn progress(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}\r", text)?;
        self.out.flush()
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.err, "{}", text)
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
