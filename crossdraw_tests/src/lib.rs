// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for Crossdraw integration tests.

use crossdraw::{Command, RecordingContext};

/// A recorder with the default drawing state.
pub fn new_context() -> RecordingContext {
    RecordingContext::new()
}

/// Finish a recorder that is expected to be balanced.
pub fn finish(ctx: RecordingContext) -> Vec<Command> {
    ctx.finish().expect("context should be balanced")
}

/// Finish a recorder and assert it captured exactly one command.
pub fn finish_single(ctx: RecordingContext) -> Command {
    let mut commands = finish(ctx);
    assert_eq!(commands.len(), 1, "expected one command: {commands:?}");
    commands.remove(0)
}
