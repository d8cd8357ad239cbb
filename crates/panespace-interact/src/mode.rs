use panespace_geometry::Pose;
use panespace_scene::{Point2, ProxyId};

/// Active interaction mode. Edit modes carry the pose (and drag anchor)
/// recorded when they were entered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    CameraMovement,
    CursorMovement,
    ScaleWindow {
        target: ProxyId,
        snapshot: Pose,
    },
    MoveWindowZ {
        target: ProxyId,
        snapshot: Pose,
        cursor: Point2,
    },
    MoveWindowXY {
        target: ProxyId,
        snapshot: Pose,
        cursor: Point2,
    },
}

impl Default for Mode {
    fn default() -> Self {
        Self::CursorMovement
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    CameraMovement,
    CursorMovement,
    ScaleWindow,
    MoveWindowZ,
    MoveWindowXY,
}

impl ModeKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CameraMovement => "fly",
            Self::CursorMovement => "cursor",
            Self::ScaleWindow => "scale",
            Self::MoveWindowZ => "move depth",
            Self::MoveWindowXY => "move plane",
        }
    }
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::CameraMovement => ModeKind::CameraMovement,
            Self::CursorMovement => ModeKind::CursorMovement,
            Self::ScaleWindow { .. } => ModeKind::ScaleWindow,
            Self::MoveWindowZ { .. } => ModeKind::MoveWindowZ,
            Self::MoveWindowXY { .. } => ModeKind::MoveWindowXY,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.edit_target().is_some()
    }

    /// Edited proxy and its pose at mode entry.
    pub fn edit_target(&self) -> Option<(ProxyId, Pose)> {
        match *self {
            Self::ScaleWindow { target, snapshot }
            | Self::MoveWindowZ {
                target, snapshot, ..
            }
            | Self::MoveWindowXY {
                target, snapshot, ..
            } => Some((target, snapshot)),
            Self::CameraMovement | Self::CursorMovement => None,
        }
    }
}
