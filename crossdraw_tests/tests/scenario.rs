// Copyright 2026 the Crossdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end drawing scenarios against the recording backend.

use std::sync::Arc;

use crossdraw::kurbo::{Point, Rect, Vec2};
use crossdraw::{
    palette, Command, EntityId, Font, FontCache, LineBreakMode, RenderContext, TextAlignment,
};
use crossdraw_tests::{finish, finish_single, new_context};

#[test]
fn translate_offsets_subsequent_fills() {
    let mut ctx = new_context();
    ctx.fill_rect(0.0, 0.0, 100.0, 50.0);
    ctx.translate(10.0, 10.0);
    ctx.fill_rect(0.0, 0.0, 10.0, 10.0);

    match finish(ctx).as_slice() {
        [Command::FillRect { rect: first, .. }, Command::FillRect { rect: second, .. }] => {
            assert_eq!(*first, Rect::new(0.0, 0.0, 100.0, 50.0));
            // The second rectangle lands at absolute (10, 10), not (0, 0).
            assert_eq!(second.origin(), Point::new(10.0, 10.0));
        }
        other => panic!("unexpected commands: {other:?}"),
    }
}

#[test]
fn color_changes_are_not_retroactive() {
    let mut ctx = new_context();
    ctx.set_color(palette::RED);
    ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
    ctx.set_color(palette::GREEN);
    ctx.fill_rect(0.0, 0.0, 1.0, 1.0);

    match finish(ctx).as_slice() {
        [Command::FillRect { color: first, .. }, Command::FillRect { color: second, .. }] => {
            assert_eq!(*first, palette::RED);
            assert_eq!(*second, palette::GREEN);
        }
        other => panic!("unexpected commands: {other:?}"),
    }
}

#[test]
fn entity_annotations_interleave_without_affecting_draws() {
    let mut ctx = new_context();
    ctx.begin_entity(EntityId(7));
    ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
    ctx.begin_entity(EntityId(8));
    ctx.fill_rect(2.0, 2.0, 1.0, 1.0);

    let commands = finish(ctx);
    assert_eq!(commands.len(), 4);
    assert_eq!(commands[0], Command::BeginEntity(EntityId(7)));
    assert_eq!(commands[2], Command::BeginEntity(EntityId(8)));
    let Command::FillRect { rect, .. } = &commands[1] else {
        panic!("annotation changed the draw stream: {commands:?}");
    };
    assert_eq!(rect.origin(), Point::new(0.0, 0.0));
}

#[test]
fn draw_string_captures_font_color_and_layout_request() {
    let mut cache = FontCache::new();
    let mut ctx = new_context();
    let font = cache.bold_system(24);
    ctx.set_font(font.clone());
    ctx.set_color(palette::DARK_GRAY);
    ctx.translate(5.0, 0.0);
    ctx.draw_string(
        "hello",
        0.0,
        0.0,
        120.0,
        40.0,
        LineBreakMode::WordWrap,
        TextAlignment::Center,
        TextAlignment::End,
    );

    match finish_single(ctx) {
        Command::DrawString {
            text,
            bounds,
            line_break,
            horizontal,
            vertical,
            font: captured,
            color,
        } => {
            assert_eq!(text, "hello");
            assert_eq!(bounds, Rect::new(5.0, 0.0, 125.0, 40.0));
            assert_eq!(line_break, LineBreakMode::WordWrap);
            assert_eq!(horizontal, TextAlignment::Center);
            assert_eq!(vertical, TextAlignment::End);
            assert!(Arc::ptr_eq(&captured, &font));
            assert_eq!(color, palette::DARK_GRAY);
        }
        other => panic!("expected a text command, got {other:?}"),
    }
}

#[test]
fn font_changes_are_not_retroactive() {
    let mut ctx = new_context();
    ctx.draw_string(
        "first",
        0.0,
        0.0,
        10.0,
        10.0,
        LineBreakMode::None,
        TextAlignment::Start,
        TextAlignment::Start,
    );
    ctx.set_font(Arc::new(Font::from_name("Papyrus", 8)));
    let commands = finish(ctx);
    match commands.as_slice() {
        [Command::DrawString { font, .. }] => assert_eq!(font.family(), "SystemFont"),
        other => panic!("unexpected commands: {other:?}"),
    }
}

#[test]
fn arcs_resolve_center_and_scaled_radii() {
    let mut ctx = new_context();
    ctx.translate(100.0, 100.0);
    ctx.scale(2.0, 1.0);
    ctx.fill_arc(10.0, 10.0, 5.0, 0.0, std::f64::consts::PI);

    match finish_single(ctx) {
        Command::FillArc { center, radii, .. } => {
            assert_eq!(center, Point::new(120.0, 110.0));
            assert_eq!(radii, Vec2::new(10.0, 5.0));
        }
        other => panic!("expected an arc, got {other:?}"),
    }
}

#[test]
fn stroked_primitives_keep_their_stroke_width() {
    let mut ctx = new_context();
    ctx.draw_rect(0.0, 0.0, 10.0, 10.0, 3.0);
    ctx.draw_oval(0.0, 0.0, 10.0, 10.0, 0.5);
    ctx.draw_rounded_rect(0.0, 0.0, 10.0, 10.0, 2.0, 1.5);

    match finish(ctx).as_slice() {
        [Command::DrawRect { stroke_width: a, .. }, Command::DrawOval { stroke_width: b, .. }, Command::DrawRoundedRect {
            radius,
            stroke_width: c,
            ..
        }] => {
            assert_eq!(*a, 3.0);
            assert_eq!(*b, 0.5);
            assert_eq!(*radius, 2.0);
            assert_eq!(*c, 1.5);
        }
        other => panic!("unexpected commands: {other:?}"),
    }
}

#[test]
fn degenerate_geometry_never_fails_and_never_draws() {
    let mut ctx = new_context();
    ctx.fill_rect(0.0, 0.0, 0.0, 10.0);
    ctx.fill_rect(0.0, 0.0, 10.0, 0.0);
    ctx.draw_rect(0.0, 0.0, -1.0, 10.0, 1.0);
    ctx.fill_oval(0.0, 0.0, 10.0, -10.0);
    ctx.draw_oval(0.0, 0.0, 10.0, 10.0, -1.0);
    ctx.fill_rounded_rect(0.0, 0.0, 10.0, 10.0, 0.0);
    ctx.fill_arc(0.0, 0.0, 0.0, 0.0, 1.0);
    ctx.draw_arc(0.0, 0.0, 5.0, f64::NAN, 1.0, 1.0);
    ctx.draw_string(
        "clipped away",
        0.0,
        0.0,
        0.0,
        0.0,
        LineBreakMode::Clip,
        TextAlignment::Start,
        TextAlignment::Start,
    );
    // The context stays fully usable afterwards.
    ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
    assert_eq!(finish(ctx).len(), 1);
}

#[test]
fn a_small_scene_records_in_issue_order() {
    let mut cache = FontCache::new();
    let mut ctx = new_context();
    ctx.set_color(palette::WHITE);
    ctx.fill_rect(0.0, 0.0, 320.0, 240.0);
    ctx.set_color(palette::BLUE);
    ctx.save_state();
    ctx.translate(20.0, 20.0);
    ctx.fill_oval(0.0, 0.0, 40.0, 40.0);
    ctx.begin_lines(true).unwrap();
    ctx.draw_line(0.0, 0.0, 40.0, 40.0, 2.0).unwrap();
    ctx.draw_line(40.0, 40.0, 80.0, 0.0, 2.0).unwrap();
    ctx.end_lines().unwrap();
    ctx.restore_state().unwrap();
    ctx.set_font(cache.system(12));
    ctx.draw_string(
        "done",
        0.0,
        200.0,
        320.0,
        40.0,
        LineBreakMode::None,
        TextAlignment::Center,
        TextAlignment::Center,
    );

    let commands = finish(ctx);
    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], Command::FillRect { .. }));
    assert!(matches!(commands[1], Command::FillOval { .. }));
    assert!(matches!(commands[2], Command::Lines { .. }));
    assert!(matches!(commands[3], Command::DrawString { .. }));
}
