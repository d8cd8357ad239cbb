mod common;

use common::harness;
use panespace_base::Result;
use panespace_interact::{Action, Color32, DrawCall, DrawList, draw_frame};
use panespace_scene::Point2;

fn key_name(action: Action) -> &'static str {
    match action {
        Action::ToggleFly => "Space",
        Action::Scale => "S",
        Action::Cancel => "Escape",
        _ => "?",
    }
}

#[test]
fn frame_draws_grid_proxies_and_panel() -> Result<()> {
    let h = harness()?;
    let mut list = DrawList::default();
    draw_frame(&h.ctx, &mut list, key_name);

    assert_eq!(
        list.calls.first(),
        Some(&DrawCall::Grid {
            slices: 10,
            spacing: 1.0
        })
    );
    let proxies = list
        .calls
        .iter()
        .filter(|call| matches!(call, DrawCall::Proxy { tint, .. } if *tint == Color32::WHITE))
        .count();
    assert_eq!(proxies, 2);
    assert!(!list.calls.iter().any(|call| matches!(call, DrawCall::WireBox { .. })));

    let texts: Vec<&str> = list
        .calls
        .iter()
        .filter_map(|call| match call {
            DrawCall::OverlayText { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts.first(), Some(&"Mode: cursor"));
    assert!(texts.contains(&"- [Space] fly"));
    Ok(())
}

#[test]
fn selection_is_tinted_boxed_and_marked() -> Result<()> {
    let mut h = harness()?;
    h.select_first();
    let mut list = DrawList::default();
    draw_frame(&h.ctx, &mut list, key_name);

    let tinted = list
        .calls
        .iter()
        .filter(|call| matches!(call, DrawCall::Proxy { tint, .. } if *tint != Color32::WHITE))
        .count();
    assert_eq!(tinted, 1);
    let count = |pred: fn(&DrawCall) -> bool| list.calls.iter().filter(|call| pred(call)).count();
    assert_eq!(count(|call| matches!(call, DrawCall::WireBox { .. })), 1);
    assert_eq!(count(|call| matches!(call, DrawCall::Sphere { .. })), 1);
    assert_eq!(count(|call| matches!(call, DrawCall::Line { .. })), 1);
    Ok(())
}

#[test]
fn hidden_proxies_are_not_drawn() -> Result<()> {
    let mut h = harness()?;
    h.press_at(Action::ToggleVisibility, Point2::new(1.0, 1.0));
    let mut list = DrawList::default();
    draw_frame(&h.ctx, &mut list, key_name);
    assert!(!list.calls.iter().any(|call| matches!(call, DrawCall::Proxy { .. })));
    Ok(())
}

#[test]
fn edit_modes_drop_ray_and_hit_marker() -> Result<()> {
    let mut h = harness()?;
    let cursor = h.select_first();
    h.press_at(Action::Scale, cursor);
    let mut list = DrawList::default();
    draw_frame(&h.ctx, &mut list, key_name);

    assert!(h.ctx.last_hit().is_some());
    assert!(!list.calls.iter().any(|call| matches!(call, DrawCall::Sphere { .. })));
    assert!(!list.calls.iter().any(|call| matches!(call, DrawCall::Line { .. })));
    assert!(list.calls.iter().any(|call| matches!(call, DrawCall::WireBox { .. })));
    Ok(())
}
