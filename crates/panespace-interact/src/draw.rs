use panespace_base::SourceHandle;
use panespace_base::cgmath64::*;
use panespace_geometry::Aabb;
use panespace_scene::{Point2, ProxyId, Rect, Vec2, WindowProxy};

use crate::context::InteractionContext;
use crate::input::Action;
use crate::mode::ModeKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_gray(value: u8) -> Self {
        Self::from_rgb(value, value, value)
    }

    pub const fn from_rgba_unmultiplied(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

const GRID_SLICES: u32 = 10;
const GRID_SPACING: f64 = 1.0;
const SELECTED_TINT: Color32 = Color32::from_rgb(255, 210, 210);
const BOUNDS_COLOR: Color32 = Color32::from_rgb(230, 41, 55);
const RAY_COLOR: Color32 = Color32::from_rgb(0, 121, 241);
const HIT_COLOR: Color32 = Color32::from_rgb(253, 249, 0);
const HIT_RADIUS: f64 = 0.05;
const RAY_LENGTH: f64 = 100.0;
const PANEL_FILL: Color32 = Color32::from_rgba_unmultiplied(102, 191, 255, 128);
const PANEL_STROKE: Color32 = Color32::from_rgb(0, 121, 241);
const TEXT_COLOR: Color32 = Color32::from_gray(80);
const TEXT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 18.0;

/// Draw primitives the frame pass needs from a rendering backend.
pub trait SceneRenderer {
    fn grid(&mut self, slices: u32, spacing: f64);
    fn proxy(&mut self, id: ProxyId, proxy: &WindowProxy, tint: Color32);
    fn line(&mut self, start: Point3, end: Point3, color: Color32);
    fn sphere(&mut self, center: Point3, radius: f64, color: Color32);
    fn wire_box(&mut self, bounds: Aabb, color: Color32);
    fn overlay_rect(&mut self, rect: Rect, fill: Color32, stroke: Color32);
    fn overlay_text(&mut self, pos: Point2, text: String, size: f32, color: Color32);
}

/// Draws the scene and the hint panel. `key_name` spells out the key bound to an action.
pub fn draw_frame<R, F>(ctx: &InteractionContext, renderer: &mut R, key_name: F)
where
    R: SceneRenderer + ?Sized,
    F: Fn(Action) -> &'static str,
{
    renderer.grid(GRID_SLICES, GRID_SPACING);

    for (id, proxy) in ctx.proxies().iter() {
        if !proxy.visible {
            continue;
        }
        if ctx.selected() == Some(id) {
            renderer.proxy(id, proxy, SELECTED_TINT);
            renderer.wire_box(proxy.world_bounds(), BOUNDS_COLOR);
        } else {
            renderer.proxy(id, proxy, Color32::WHITE);
        }
    }

    if ctx.mode().kind() == ModeKind::CursorMovement {
        if let Some(ray) = ctx.last_ray() {
            renderer.line(ray.at(ctx.camera().near_depth()), ray.at(RAY_LENGTH), RAY_COLOR);
        }
        if let Some(hit) = ctx.last_hit() {
            renderer.sphere(hit.point, HIT_RADIUS, HIT_COLOR);
        }
    }

    let lines = hint_lines(ctx.mode().kind(), &key_name);
    let panel = Rect::from_min_size(
        Point2::new(10.0, 10.0),
        Vec2::new(260.0, 12.0 + LINE_HEIGHT * lines.len() as f32),
    );
    renderer.overlay_rect(panel, PANEL_FILL, PANEL_STROKE);
    for (row, text) in lines.into_iter().enumerate() {
        let pos = Point2::new(20.0, 16.0 + LINE_HEIGHT * row as f32);
        renderer.overlay_text(pos, text, TEXT_SIZE, TEXT_COLOR);
    }
}

fn hint_lines(mode: ModeKind, key_name: &impl Fn(Action) -> &'static str) -> Vec<String> {
    let hint = |action: Action, what: &str| format!("- [{}] {what}", key_name(action));
    let mut lines = vec![format!("Mode: {}", mode.label())];
    match mode {
        ModeKind::CameraMovement => {
            lines.push(hint(Action::ToggleFly, "stop flying"));
            lines.push(hint(Action::Forward, "forward"));
            lines.push(hint(Action::Ascend, "up"));
            lines.push(hint(Action::Descend, "down"));
            lines.push(hint(Action::ResetTarget, "look at origin"));
        }
        ModeKind::CursorMovement => {
            lines.push(hint(Action::ToggleFly, "fly"));
            lines.push(hint(Action::Scale, "scale selection"));
            lines.push(hint(Action::MoveDepth, "move selection in depth"));
            lines.push(hint(Action::MovePlane, "move selection around"));
            lines.push(hint(Action::ToggleVisibility, "show/hide windows"));
        }
        ModeKind::ScaleWindow | ModeKind::MoveWindowZ | ModeKind::MoveWindowXY => {
            lines.push(hint(Action::Commit, "or click to apply"));
            lines.push(hint(Action::Cancel, "cancel"));
        }
    }
    lines.push(hint(Action::Quit, "quit"));
    lines
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Grid {
        slices: u32,
        spacing: f64,
    },
    Proxy {
        id: ProxyId,
        source: SourceHandle,
        tint: Color32,
    },
    Line {
        start: Point3,
        end: Point3,
        color: Color32,
    },
    Sphere {
        center: Point3,
        radius: f64,
        color: Color32,
    },
    WireBox {
        bounds: Aabb,
        color: Color32,
    },
    OverlayRect {
        rect: Rect,
        fill: Color32,
        stroke: Color32,
    },
    OverlayText {
        pos: Point2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// Records draw calls instead of issuing them.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
}

impl SceneRenderer for DrawList {
    fn grid(&mut self, slices: u32, spacing: f64) {
        self.calls.push(DrawCall::Grid { slices, spacing });
    }

    fn proxy(&mut self, id: ProxyId, proxy: &WindowProxy, tint: Color32) {
        self.calls.push(DrawCall::Proxy {
            id,
            source: proxy.source,
            tint,
        });
    }

    fn line(&mut self, start: Point3, end: Point3, color: Color32) {
        self.calls.push(DrawCall::Line { start, end, color });
    }

    fn sphere(&mut self, center: Point3, radius: f64, color: Color32) {
        self.calls.push(DrawCall::Sphere {
            center,
            radius,
            color,
        });
    }

    fn wire_box(&mut self, bounds: Aabb, color: Color32) {
        self.calls.push(DrawCall::WireBox { bounds, color });
    }

    fn overlay_rect(&mut self, rect: Rect, fill: Color32, stroke: Color32) {
        self.calls.push(DrawCall::OverlayRect { rect, fill, stroke });
    }

    fn overlay_text(&mut self, pos: Point2, text: String, size: f32, color: Color32) {
        self.calls.push(DrawCall::OverlayText {
            pos,
            text,
            size,
            color,
        });
    }
}
