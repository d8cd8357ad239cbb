#![allow(dead_code)]

use panespace_base::cgmath64::*;
use panespace_base::{Result, SourceHandle};
use panespace_interact::{Action, InputFrame, InteractionContext, InteractionSettings};
use panespace_scene::{Camera, MemoryTextures, Point2, Rect, SyntheticCapture, Vec2};

pub const FIRST: SourceHandle = SourceHandle::new(0x1e0_002c);
pub const SECOND: SourceHandle = SourceHandle::new(0x1e0_0031);

pub struct Harness {
    pub ctx: InteractionContext,
    pub capture: SyntheticCapture,
    pub textures: MemoryTextures,
}

pub fn viewport() -> Rect {
    Rect::from_min_size(Point2::new(0.0, 0.0), Vec2::new(800.0, 600.0))
}

/// Two windows at (0, 3.25, -0.8) and (2, 2.25, -1.0), camera at (0, 2, 8) looking at (0, 0, -3).
pub fn harness() -> Result<Harness> {
    let mut capture = SyntheticCapture::new()
        .with_surface(FIRST, 800, 600)
        .with_surface(SECOND, 640, 480);
    let mut textures = MemoryTextures::new();
    let ctx = InteractionContext::setup(
        Camera::default(),
        &[
            (FIRST, Point3::new(0.0, 3.25, -0.8)),
            (SECOND, Point3::new(2.0, 2.25, -1.0)),
        ],
        InteractionSettings::default(),
        &mut capture,
        &mut textures,
    )?;
    Ok(Harness {
        ctx,
        capture,
        textures,
    })
}

impl Harness {
    pub fn tick(&mut self, input: InputFrame) -> panespace_interact::TickOutcome {
        self.ctx.update(&input, &mut self.capture, &mut self.textures)
    }

    pub fn idle_at(&mut self, cursor: Point2) -> panespace_interact::TickOutcome {
        self.tick(InputFrame::new(viewport(), cursor))
    }

    pub fn press_at(&mut self, action: Action, cursor: Point2) -> panespace_interact::TickOutcome {
        self.tick(InputFrame::new(viewport(), cursor).with_pressed(action))
    }

    /// Screen position of a world point under the current camera.
    pub fn screen_of(&self, point: Point3) -> Point2 {
        self.ctx
            .camera()
            .project(point, viewport())
            .map(|(pos, _)| pos)
            .expect("point is in front of the camera")
    }

    /// Picks the first proxy by hovering its centre.
    pub fn select_first(&mut self) -> Point2 {
        let cursor = self.screen_of(Point3::new(0.0, 3.25, -0.8));
        self.idle_at(cursor);
        cursor
    }
}
