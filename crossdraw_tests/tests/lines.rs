// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests of the batched line-session protocol.

use crossdraw::kurbo::Point;
use crossdraw::{palette, Command, Error, ErrorKind, RenderContext};
use crossdraw_tests::{finish, finish_single, new_context};

#[test]
fn session_flushes_one_batch_with_all_segments() {
    let mut ctx = new_context();
    ctx.begin_lines(false).unwrap();
    ctx.draw_line(0.0, 0.0, 10.0, 0.0, 1.0).unwrap();
    ctx.draw_line(10.0, 0.0, 10.0, 10.0, 1.0).unwrap();
    ctx.draw_line(10.0, 10.0, 0.0, 10.0, 1.0).unwrap();
    ctx.end_lines().unwrap();

    match finish_single(ctx) {
        Command::Lines {
            rounded, segments, ..
        } => {
            assert!(!rounded);
            assert_eq!(segments.len(), 3);
            assert_eq!(segments[0].start, Point::new(0.0, 0.0));
            assert_eq!(segments[2].end, Point::new(0.0, 10.0));
        }
        other => panic!("expected a line batch, got {other:?}"),
    }
}

#[test]
fn draw_line_outside_a_session_is_invalid_state() {
    let mut ctx = new_context();
    let err = ctx.draw_line(0.0, 0.0, 1.0, 1.0, 1.0).unwrap_err();
    assert_eq!(err, Error::LineSessionNotOpen);
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn nested_begin_lines_is_invalid_state() {
    let mut ctx = new_context();
    ctx.begin_lines(false).unwrap();
    assert_eq!(ctx.begin_lines(true), Err(Error::LineSessionAlreadyOpen));
    // The original session is still open and usable.
    ctx.draw_line(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    ctx.end_lines().unwrap();
}

#[test]
fn end_lines_without_a_session_is_invalid_state() {
    let mut ctx = new_context();
    assert_eq!(ctx.end_lines(), Err(Error::LineSessionNotOpen));
}

#[test]
fn rounded_flag_covers_the_whole_batch() {
    let mut ctx = new_context();
    ctx.begin_lines(true).unwrap();
    ctx.draw_line(0.0, 0.0, 5.0, 5.0, 2.0).unwrap();
    ctx.end_lines().unwrap();
    match finish_single(ctx) {
        Command::Lines { rounded, .. } => assert!(rounded),
        other => panic!("expected a line batch, got {other:?}"),
    }
}

#[test]
fn segments_are_resolved_against_the_transform_at_call_time() {
    let mut ctx = new_context();
    ctx.begin_lines(false).unwrap();
    ctx.draw_line(0.0, 0.0, 1.0, 0.0, 1.0).unwrap();
    ctx.translate(10.0, 10.0);
    ctx.draw_line(0.0, 0.0, 1.0, 0.0, 1.0).unwrap();
    ctx.end_lines().unwrap();
    match finish_single(ctx) {
        Command::Lines { segments, .. } => {
            assert_eq!(segments[0].start, Point::new(0.0, 0.0));
            assert_eq!(segments[1].start, Point::new(10.0, 10.0));
        }
        other => panic!("expected a line batch, got {other:?}"),
    }
}

#[test]
fn batch_color_is_the_color_at_flush_time() {
    let mut ctx = new_context();
    ctx.set_color(palette::RED);
    ctx.begin_lines(false).unwrap();
    ctx.draw_line(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    ctx.set_color(palette::BLUE);
    ctx.end_lines().unwrap();
    match finish_single(ctx) {
        Command::Lines { color, .. } => assert_eq!(color, palette::BLUE),
        other => panic!("expected a line batch, got {other:?}"),
    }
}

#[test]
fn empty_session_flushes_nothing() {
    let mut ctx = new_context();
    ctx.begin_lines(false).unwrap();
    ctx.end_lines().unwrap();
    assert!(finish(ctx).is_empty());
}

#[test]
fn degenerate_width_segments_are_dropped() {
    let mut ctx = new_context();
    ctx.begin_lines(false).unwrap();
    ctx.draw_line(0.0, 0.0, 1.0, 1.0, 0.0).unwrap();
    ctx.draw_line(0.0, 0.0, 1.0, 1.0, -3.0).unwrap();
    ctx.draw_line(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    ctx.end_lines().unwrap();
    match finish_single(ctx) {
        Command::Lines { segments, .. } => assert_eq!(segments.len(), 1),
        other => panic!("expected a line batch, got {other:?}"),
    }
}

#[test]
fn sessions_can_repeat_after_closing() {
    let mut ctx = new_context();
    for _ in 0..2 {
        ctx.begin_lines(false).unwrap();
        ctx.draw_line(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
        ctx.end_lines().unwrap();
    }
    assert_eq!(finish(ctx).len(), 2);
}
