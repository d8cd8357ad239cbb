mod common;

use common::{FIRST, harness, viewport};
use panespace_base::cgmath64::*;
use panespace_base::tolerance::Tolerance;
use panespace_base::{Result, assert_near};
use panespace_interact::{Action, CursorCommand, InputFrame, Mode, ModeKind};
use panespace_scene::{Point2, ProxyId};

#[test]
fn end_to_end_pick_scale_cancel() -> Result<()> {
    let mut h = harness()?;
    let center = Point3::new(0.0, 3.25, -0.8);
    let cursor = h.select_first();

    assert_eq!(h.ctx.selected(), Some(ProxyId::new(0)));
    let hit = h.ctx.last_hit().expect("cursor is over the first window");
    let expected = (h.ctx.camera().position - center).magnitude();
    assert!((hit.distance - expected).abs() < 1.0e-3);

    h.press_at(Action::Scale, cursor);
    assert_eq!(h.ctx.mode().kind(), ModeKind::ScaleWindow);

    h.idle_at(viewport().center());
    let proxy = h.ctx.selected_proxy().expect("selection survives edits");
    assert_near!(proxy.pose.scale(), 0.03);

    h.press_at(Action::Cancel, viewport().center());
    assert_eq!(h.ctx.mode(), Mode::CursorMovement);
    let proxy = h.ctx.selected_proxy().expect("selection survives cancel");
    assert_near!(proxy.pose.scale(), 1.0);
    assert_near!(proxy.pose.position(), center);
    Ok(())
}

#[test]
fn edit_triggers_without_selection_are_ignored() -> Result<()> {
    let mut h = harness()?;
    let corner = Point2::new(1.0, 1.0);
    for action in [Action::Scale, Action::MoveDepth, Action::MovePlane] {
        h.press_at(action, corner);
        assert_eq!(h.ctx.mode(), Mode::CursorMovement);
        assert_eq!(h.ctx.selected(), None);
    }
    Ok(())
}

#[test]
fn miss_keeps_previous_selection() -> Result<()> {
    let mut h = harness()?;
    h.select_first();
    h.idle_at(Point2::new(1.0, 1.0));
    assert_eq!(h.ctx.selected(), Some(ProxyId::new(0)));
    assert!(h.ctx.last_hit().is_none());
    assert!(h.ctx.last_ray().is_some());
    Ok(())
}

#[test]
fn cancel_restores_snapshot_in_every_edit_mode() -> Result<()> {
    for trigger in [Action::Scale, Action::MoveDepth, Action::MovePlane] {
        let mut h = harness()?;
        let cursor = h.select_first();
        let before = h.ctx.selected_proxy().expect("selected").pose;

        h.press_at(trigger, cursor);
        assert!(h.ctx.mode().is_edit(), "{trigger:?} enters an edit mode");
        for offset in [(40.0, -25.0), (-120.0, 90.0), (300.0, 200.0)] {
            h.idle_at(Point2::new(cursor.x + offset.0, cursor.y + offset.1));
        }
        let edited = h.ctx.selected_proxy().expect("selected").pose;
        assert!(!edited.near(&before), "{trigger:?} changed the pose");

        h.press_at(Action::Cancel, cursor);
        assert_eq!(h.ctx.mode(), Mode::CursorMovement);
        assert_near!(h.ctx.selected_proxy().expect("selected").pose, before);
    }
    Ok(())
}

#[test]
fn commit_keeps_edited_pose() -> Result<()> {
    let mut h = harness()?;
    let cursor = h.select_first();
    h.press_at(Action::MoveDepth, cursor);
    h.idle_at(Point2::new(cursor.x, cursor.y + 30.0));
    let edited = h.ctx.selected_proxy().expect("selected").pose;

    h.tick(InputFrame::new(viewport(), cursor).with_click());
    assert_eq!(h.ctx.mode(), Mode::CursorMovement);
    assert_near!(h.ctx.selected_proxy().expect("selected").pose, edited);

    h.press_at(Action::Scale, cursor);
    h.idle_at(Point2::new(700.0, 100.0));
    let scaled = h.ctx.selected_proxy().expect("selected").pose;
    h.press_at(Action::Commit, cursor);
    assert_eq!(h.ctx.mode(), Mode::CursorMovement);
    assert_near!(h.ctx.selected_proxy().expect("selected").pose, scaled);
    Ok(())
}

#[test]
fn edit_snapshot_records_entry_state() -> Result<()> {
    let mut h = harness()?;
    let cursor = h.select_first();
    let pose = h.ctx.selected_proxy().expect("selected").pose;
    h.press_at(Action::MovePlane, cursor);
    assert_eq!(
        h.ctx.mode(),
        Mode::MoveWindowXY {
            target: ProxyId::new(0),
            snapshot: pose,
            cursor,
        }
    );
    Ok(())
}

fn enter(kind: ModeKind) -> Result<common::Harness> {
    let mut h = harness()?;
    let cursor = h.select_first();
    match kind {
        ModeKind::CursorMovement => {}
        ModeKind::CameraMovement => {
            h.press_at(Action::ToggleFly, cursor);
        }
        ModeKind::ScaleWindow => {
            h.press_at(Action::Scale, cursor);
        }
        ModeKind::MoveWindowZ => {
            h.press_at(Action::MoveDepth, cursor);
        }
        ModeKind::MoveWindowXY => {
            h.press_at(Action::MovePlane, cursor);
        }
    }
    assert_eq!(h.ctx.mode().kind(), kind);
    Ok(h)
}

#[test]
fn transitions_stay_inside_the_mode_graph() -> Result<()> {
    use ModeKind::*;
    let all = [
        CameraMovement,
        CursorMovement,
        ScaleWindow,
        MoveWindowZ,
        MoveWindowXY,
    ];
    for from in all {
        let mut inputs: Vec<InputFrame> = Action::ALL
            .into_iter()
            .map(|action| InputFrame::new(viewport(), viewport().center()).with_pressed(action))
            .collect();
        inputs.push(InputFrame::new(viewport(), viewport().center()).with_click());
        inputs.push(InputFrame::new(viewport(), viewport().center()));

        for input in inputs {
            let mut h = enter(from)?;
            h.tick(input);
            let to = h.ctx.mode().kind();
            let allowed = match from {
                CursorMovement => true,
                CameraMovement => matches!(to, CameraMovement | CursorMovement),
                edit => to == edit || to == CursorMovement,
            };
            assert!(allowed, "{from:?} -> {to:?} on {input:?}");
        }
    }
    Ok(())
}

#[test]
fn fly_mode_moves_camera_and_billboards_proxies() -> Result<()> {
    let mut h = harness()?;
    let outcome = h.press_at(Action::ToggleFly, viewport().center());
    assert_eq!(outcome.cursor, Some(CursorCommand::Grab));
    assert_eq!(h.ctx.mode(), Mode::CameraMovement);

    let start = h.ctx.camera().position;
    let input = InputFrame::new(viewport(), Point2::new(430.0, 290.0))
        .with_dt(0.1)
        .with_down(Action::Forward)
        .with_down(Action::StrafeRight);
    let outcome = h.tick(input);
    assert_eq!(outcome.warp_to, Some(viewport().center()));

    let camera = *h.ctx.camera();
    assert_near!(camera.position.y, start.y);
    assert!((camera.position - start).magnitude() > 0.5);
    for (_, proxy) in h.ctx.proxies().iter() {
        let front = (camera.position - proxy.pose.position()).normalize();
        assert_near!(proxy.pose.basis().front(), front);
    }

    let outcome = h.tick(InputFrame::new(viewport(), viewport().center()).with_click());
    assert_eq!(outcome.cursor, Some(CursorCommand::Release));
    assert_eq!(h.ctx.mode(), Mode::CursorMovement);
    Ok(())
}

#[test]
fn fly_controls_ascend_and_reset_target() -> Result<()> {
    let mut h = harness()?;
    h.press_at(Action::ToggleFly, viewport().center());
    let height = h.ctx.camera().position.y;
    let ascend = InputFrame::new(viewport(), viewport().center())
        .with_dt(0.5)
        .with_down(Action::Ascend);
    h.tick(ascend);
    assert_near!(h.ctx.camera().position.y, height + 5.0);

    h.press_at(Action::ResetTarget, viewport().center());
    let forward = h.ctx.camera().forward();
    let to_origin = (Point3::origin() - h.ctx.camera().position).normalize();
    assert!((forward - to_origin).magnitude() < 1.0e-6);
    Ok(())
}

#[test]
fn only_the_selected_proxy_is_refreshed() -> Result<()> {
    let mut h = harness()?;
    let after_setup = h.capture.capture_count();
    let outcome = h.idle_at(Point2::new(1.0, 1.0));
    assert!(!outcome.refreshed);
    assert_eq!(h.capture.capture_count(), after_setup);

    h.select_first();
    h.idle_at(Point2::new(1.0, 1.0));
    let first = h.ctx.proxies().get(ProxyId::new(0)).expect("first").texture();
    let second = h.ctx.proxies().get(ProxyId::new(1)).expect("second").texture();
    assert_eq!(h.textures.revision(first), Some(2));
    assert_eq!(h.textures.revision(second), Some(0));
    assert_eq!(h.capture.capture_count(), after_setup + 2);
    Ok(())
}

#[test]
fn capture_failure_is_not_fatal() -> Result<()> {
    let mut h = harness()?;
    let cursor = h.select_first();
    let texture = h.ctx.selected_proxy().expect("selected").texture();
    let revision = h.textures.revision(texture);

    h.capture.set_available(FIRST, false);
    let outcome = h.press_at(Action::Scale, cursor);
    assert!(!outcome.refreshed);
    assert_eq!(h.textures.revision(texture), revision);
    assert_eq!(h.ctx.mode().kind(), ModeKind::ScaleWindow);

    h.capture.set_available(FIRST, true);
    assert!(h.idle_at(cursor).refreshed);
    Ok(())
}

#[test]
fn hidden_proxies_are_neither_picked_nor_refreshed() -> Result<()> {
    let mut h = harness()?;
    let cursor = h.select_first();
    let outcome = h.press_at(Action::ToggleVisibility, cursor);
    assert!(!outcome.refreshed);
    assert!(h.ctx.proxies().iter().all(|(_, proxy)| !proxy.visible));
    assert!(h.ctx.last_hit().is_none());
    assert_eq!(h.ctx.selected(), Some(ProxyId::new(0)));

    h.press_at(Action::ToggleVisibility, cursor);
    assert!(h.ctx.proxies().iter().all(|(_, proxy)| proxy.visible));
    assert!(h.ctx.last_hit().is_some());
    Ok(())
}

#[test]
fn quit_stops_before_any_state_change() -> Result<()> {
    let mut h = harness()?;
    let input = InputFrame::new(viewport(), viewport().center())
        .with_pressed(Action::Quit)
        .with_pressed(Action::ToggleFly);
    let outcome = h.tick(input);
    assert!(outcome.quit);
    assert_eq!(h.ctx.mode(), Mode::CursorMovement);
    Ok(())
}
