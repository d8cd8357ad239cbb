use panespace_base::cgmath64::*;
use panespace_base::{Result, SourceHandle};
use panespace_geometry::Ray;
use panespace_scene::{
    Camera, PickHit, Point2, ProxyCollection, ProxyId, SurfaceCapture, TextureSink, WindowProxy,
    pick,
};
use tracing::{debug, info, trace};

use crate::edit::{depth_moved_pose, plane_moved_pose, scale_factor, scaled_pose};
use crate::input::{Action, InputFrame};
use crate::mode::Mode;
use crate::settings::InteractionSettings;

/// Request to the host about the OS cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorCommand {
    /// Hide and confine the cursor for fly mode.
    Grab,
    /// Show the cursor again.
    Release,
}

/// What the host has to do after a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub cursor: Option<CursorCommand>,
    /// Move the OS cursor here before the next tick.
    pub warp_to: Option<Point2>,
    pub quit: bool,
    /// The selected proxy's texture got fresh content.
    pub refreshed: bool,
}

/// Everything the per-tick update reads and writes: camera, proxies, mode
/// and selection.
#[derive(Clone, Debug)]
pub struct InteractionContext {
    camera: Camera,
    proxies: ProxyCollection,
    mode: Mode,
    selected: Option<ProxyId>,
    last_ray: Option<Ray>,
    last_hit: Option<PickHit>,
    settings: InteractionSettings,
}

impl InteractionContext {
    pub fn new(camera: Camera, proxies: ProxyCollection, settings: InteractionSettings) -> Self {
        Self {
            camera,
            proxies,
            mode: Mode::CursorMovement,
            selected: None,
            last_ray: None,
            last_hit: None,
            settings,
        }
    }

    /// Creates one proxy per tracked window. Fails on the first window whose
    /// attributes or first capture cannot be read.
    pub fn setup(
        camera: Camera,
        windows: &[(SourceHandle, Point3)],
        settings: InteractionSettings,
        capture: &mut impl SurfaceCapture,
        textures: &mut impl TextureSink,
    ) -> Result<Self> {
        settings.validate()?;
        let mut proxies = ProxyCollection::new();
        for &(source, position) in windows {
            proxies.push(WindowProxy::create(
                source, position, &camera, capture, textures,
            )?);
        }
        info!(proxies = proxies.len(), "scene ready");
        Ok(Self::new(camera, proxies, settings))
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn proxies(&self) -> &ProxyCollection {
        &self.proxies
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> Option<ProxyId> {
        self.selected
    }

    pub fn selected_proxy(&self) -> Option<&WindowProxy> {
        self.selected.and_then(|id| self.proxies.get(id))
    }

    pub fn last_ray(&self) -> Option<Ray> {
        self.last_ray
    }

    pub fn last_hit(&self) -> Option<PickHit> {
        self.last_hit
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// Selects `id` directly. Unknown ids are ignored and return `false`.
    pub fn select(&mut self, id: ProxyId) -> bool {
        if self.proxies.get(id).is_none() {
            return false;
        }
        if self.selected != Some(id) {
            debug!(proxy = id.index(), "selection changed");
            self.selected = Some(id);
        }
        true
    }

    /// Runs one tick: mode logic first, then the texture refresh of the
    /// selected proxy.
    pub fn update(
        &mut self,
        input: &InputFrame,
        capture: &mut impl SurfaceCapture,
        textures: &mut impl TextureSink,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if input.pressed(Action::Quit) {
            outcome.quit = true;
            return outcome;
        }
        if input.pressed(Action::ToggleVisibility) {
            self.proxies.toggle_visibility_all();
            debug!("proxy visibility toggled");
        }

        match self.mode {
            Mode::CameraMovement => self.update_fly(input, &mut outcome),
            Mode::CursorMovement => self.update_cursor(input, &mut outcome),
            Mode::ScaleWindow { .. } | Mode::MoveWindowZ { .. } | Mode::MoveWindowXY { .. } => {
                self.update_edit(input)
            }
        }

        outcome.refreshed = self.refresh_selected(capture, textures);
        outcome
    }

    fn update_fly(&mut self, input: &InputFrame, outcome: &mut TickOutcome) {
        if input.pressed(Action::ToggleFly)
            || input.pressed(Action::Cancel)
            || input.primary_clicked
        {
            self.set_mode(Mode::CursorMovement);
            outcome.cursor = Some(CursorCommand::Release);
            return;
        }

        let step = self.settings.move_speed * input.dt;
        if input.down(Action::Forward) {
            self.camera.move_forward(step, true);
        }
        if input.down(Action::Backward) {
            self.camera.move_forward(-step, true);
        }
        if input.down(Action::StrafeLeft) {
            self.camera.move_right(-step, true);
        }
        if input.down(Action::StrafeRight) {
            self.camera.move_right(step, true);
        }
        if input.pressed(Action::ResetTarget) {
            self.camera.target = Point3::origin();
        }
        if input.down(Action::Descend) {
            self.camera.move_up(-step);
        }
        if input.down(Action::Ascend) {
            self.camera.move_up(step);
        }

        let center = input.viewport.center();
        let delta = input.cursor - center;
        let sensitivity = self.settings.mouse_sensitivity;
        self.camera.yaw(-delta.x as f64 * sensitivity);
        self.camera.pitch(-delta.y as f64 * sensitivity);
        outcome.warp_to = Some(center);

        self.proxies.face_all_toward(self.camera.position);
    }

    fn update_cursor(&mut self, input: &InputFrame, outcome: &mut TickOutcome) {
        if input.pressed(Action::ToggleFly) {
            self.set_mode(Mode::CameraMovement);
            outcome.cursor = Some(CursorCommand::Grab);
            outcome.warp_to = Some(input.viewport.center());
            return;
        }

        let trigger = [Action::Scale, Action::MoveDepth, Action::MovePlane]
            .into_iter()
            .find(|action| input.pressed(*action));
        if let Some(action) = trigger {
            if let Some(mode) = self.edit_mode_for(action, input.cursor) {
                self.set_mode(mode);
                return;
            }
            trace!(?action, "edit trigger ignored without a selection");
        }

        let ray = self.camera.screen_ray(input.cursor, input.viewport);
        self.last_ray = Some(ray);
        self.last_hit = pick(&ray, &self.proxies);
        if let Some(hit) = self.last_hit {
            self.select(hit.id);
        }
    }

    fn edit_mode_for(&self, action: Action, cursor: Point2) -> Option<Mode> {
        let target = self.selected?;
        let snapshot = self.proxies.get(target)?.pose;
        match action {
            Action::Scale => Some(Mode::ScaleWindow { target, snapshot }),
            Action::MoveDepth => Some(Mode::MoveWindowZ {
                target,
                snapshot,
                cursor,
            }),
            Action::MovePlane => Some(Mode::MoveWindowXY {
                target,
                snapshot,
                cursor,
            }),
            _ => None,
        }
    }

    fn update_edit(&mut self, input: &InputFrame) {
        let Some((target, snapshot)) = self.mode.edit_target() else {
            return;
        };

        if input.pressed(Action::Cancel) {
            if let Some(proxy) = self.proxies.get_mut(target) {
                proxy.pose = snapshot;
            }
            self.set_mode(Mode::CursorMovement);
            return;
        }
        if input.primary_clicked || input.pressed(Action::Commit) {
            self.set_mode(Mode::CursorMovement);
            return;
        }

        let pose = match self.mode {
            Mode::ScaleWindow { .. } => {
                let factor = scale_factor(input.cursor, input.viewport, &self.settings);
                scaled_pose(snapshot, factor)
            }
            Mode::MoveWindowZ { cursor, .. } => {
                depth_moved_pose(snapshot, cursor, input.cursor, &self.camera, &self.settings)
            }
            Mode::MoveWindowXY { cursor, .. } => {
                plane_moved_pose(snapshot, cursor, input.cursor, &self.camera, &self.settings)
            }
            Mode::CameraMovement | Mode::CursorMovement => return,
        };
        if let Some(proxy) = self.proxies.get_mut(target) {
            proxy.pose = pose;
        }
    }

    fn refresh_selected(
        &self,
        capture: &mut impl SurfaceCapture,
        textures: &mut impl TextureSink,
    ) -> bool {
        match self.selected_proxy() {
            Some(proxy) if proxy.visible => proxy.refresh_texture(capture, textures),
            _ => false,
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        debug!(
            from = self.mode.kind().label(),
            to = mode.kind().label(),
            "mode changed"
        );
        self.mode = mode;
    }
}
