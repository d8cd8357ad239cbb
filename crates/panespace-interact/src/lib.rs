pub mod context;
pub mod draw;
pub mod edit;
pub mod input;
pub mod mode;
pub mod settings;

pub use context::{CursorCommand, InteractionContext, TickOutcome};
pub use draw::{Color32, DrawCall, DrawList, SceneRenderer, draw_frame};
pub use input::{Action, ActionSet, InputFrame};
pub use mode::{Mode, ModeKind};
pub use settings::InteractionSettings;
