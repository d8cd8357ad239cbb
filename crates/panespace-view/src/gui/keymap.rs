use egui::Key;
use panespace_interact::{Action, ActionSet};

/// Physical keys per action. The first key listed for an action is the one shown in hints.
pub const BINDINGS: [(Action, Key); 20] = [
    (Action::ToggleFly, Key::Space),
    (Action::Scale, Key::S),
    (Action::MoveDepth, Key::D),
    (Action::MoveDepth, Key::Z),
    (Action::MovePlane, Key::G),
    (Action::Commit, Key::Enter),
    (Action::Cancel, Key::Escape),
    (Action::ToggleVisibility, Key::H),
    (Action::Forward, Key::ArrowUp),
    (Action::Backward, Key::ArrowDown),
    (Action::StrafeLeft, Key::ArrowLeft),
    (Action::StrafeRight, Key::ArrowRight),
    (Action::Ascend, Key::F4),
    (Action::Ascend, Key::PageUp),
    (Action::Descend, Key::F3),
    (Action::Descend, Key::PageDown),
    (Action::ResetTarget, Key::F2),
    (Action::ResetTarget, Key::Home),
    (Action::Quit, Key::Q),
    (Action::Quit, Key::F10),
];

pub fn key_name(action: Action) -> &'static str {
    BINDINGS
        .iter()
        .find(|(bound, _)| *bound == action)
        .map(|(_, key)| key.name())
        .unwrap_or("?")
}

/// Actions pressed this frame and actions held.
pub fn sample(ctx: &egui::Context) -> (ActionSet, ActionSet) {
    ctx.input(|input| {
        let mut pressed = ActionSet::EMPTY;
        let mut down = ActionSet::EMPTY;
        for (action, key) in BINDINGS {
            if input.key_pressed(key) {
                pressed.insert(action);
            }
            if input.key_down(key) {
                down.insert(action);
            }
        }
        (pressed, down)
    })
}
