use panespace_scene::{Point2, Rect};

/// Logical inputs; the host maps physical keys onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleFly,
    Scale,
    MoveDepth,
    MovePlane,
    Commit,
    Cancel,
    ToggleVisibility,
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
    ResetTarget,
    Quit,
}

impl Action {
    pub const ALL: [Action; 15] = [
        Action::ToggleFly,
        Action::Scale,
        Action::MoveDepth,
        Action::MovePlane,
        Action::Commit,
        Action::Cancel,
        Action::ToggleVisibility,
        Action::Forward,
        Action::Backward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Ascend,
        Action::Descend,
        Action::ResetTarget,
        Action::Quit,
    ];

    const fn bit(self) -> u32 {
        1 << self as u32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionSet(u32);

impl ActionSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Input sampled once at the start of a tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputFrame {
    pub viewport: Rect,
    pub cursor: Point2,
    /// Seconds since the previous tick.
    pub dt: f64,
    pub primary_clicked: bool,
    /// Actions whose key went down this tick.
    pub pressed: ActionSet,
    /// Actions whose key is held.
    pub down: ActionSet,
}

impl InputFrame {
    pub fn new(viewport: Rect, cursor: Point2) -> Self {
        Self {
            viewport,
            cursor,
            ..Self::default()
        }
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_pressed(mut self, action: Action) -> Self {
        self.pressed.insert(action);
        self
    }

    pub fn with_down(mut self, action: Action) -> Self {
        self.down.insert(action);
        self
    }

    pub fn with_click(mut self) -> Self {
        self.primary_clicked = true;
        self
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    pub fn down(&self, action: Action) -> bool {
        self.down.contains(action)
    }
}
