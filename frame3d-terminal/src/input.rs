/// Keyboard bindings for the viewer
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use frame3d_core::ProjectionMode;

/// One of the three local axes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Right,
    Up,
    Back,
}

/// What a key press asks the viewer to do. `sign` is +1 or -1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    MoveCamera { axis: Axis, sign: f32 },
    /// Yaw (Up), pitch (Right) or roll (Back).
    TurnCamera { axis: Axis, sign: f32 },
    ResetCamera,
    Projection(ProjectionMode),
    /// Positive widens the field of view.
    Zoom { sign: f64 },
    MoveModel { axis: Axis, sign: f32 },
    TurnModel { axis: Axis, sign: f32 },
    ScaleModel(f32),
    Quit,
}

/// Translate a key event into a command. Releases and unbound keys map to
/// `None`.
pub fn key_to_command(event: KeyEvent) -> Option<ViewerCommand> {
    use Axis::*;
    use ViewerCommand::*;

    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Quit);
    }

    let command = match event.code {
        KeyCode::Esc => Quit,

        KeyCode::Left => TurnCamera { axis: Up, sign: 1.0 },
        KeyCode::Right => TurnCamera { axis: Up, sign: -1.0 },
        KeyCode::Up => TurnCamera { axis: Right, sign: 1.0 },
        KeyCode::Down => TurnCamera { axis: Right, sign: -1.0 },

        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => MoveCamera { axis: Right, sign: -1.0 },
            'd' => MoveCamera { axis: Right, sign: 1.0 },
            'f' => MoveCamera { axis: Up, sign: 1.0 },
            'c' => MoveCamera { axis: Up, sign: -1.0 },
            'w' => MoveCamera { axis: Back, sign: -1.0 },
            's' => MoveCamera { axis: Back, sign: 1.0 },
            'q' => TurnCamera { axis: Back, sign: 1.0 },
            'e' => TurnCamera { axis: Back, sign: -1.0 },
            'r' => ResetCamera,

            'p' => Projection(ProjectionMode::SymmetricPerspective),
            '[' => Projection(ProjectionMode::AsymmetricPerspective),
            'o' => Projection(ProjectionMode::Orthographic),

            '+' | '=' => Zoom { sign: -1.0 },
            '-' | '_' => Zoom { sign: 1.0 },

            'j' => TurnModel { axis: Up, sign: 1.0 },
            'l' => TurnModel { axis: Up, sign: -1.0 },
            'i' => TurnModel { axis: Right, sign: 1.0 },
            'k' => TurnModel { axis: Right, sign: -1.0 },
            'n' => TurnModel { axis: Back, sign: 1.0 },
            'm' => TurnModel { axis: Back, sign: -1.0 },

            '1' => MoveModel { axis: Right, sign: 1.0 },
            '2' => MoveModel { axis: Right, sign: -1.0 },
            '3' => MoveModel { axis: Up, sign: 1.0 },
            '4' => MoveModel { axis: Up, sign: -1.0 },
            '5' => MoveModel { axis: Back, sign: 1.0 },
            '6' => MoveModel { axis: Back, sign: -1.0 },
            '7' => ScaleModel(1.01),
            '8' => ScaleModel(0.99),

            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}
