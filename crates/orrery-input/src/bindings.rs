//! Fixed key bindings: digits select the focused body, Escape quits.

use orrery_scene::Body;
use winit::keyboard::{KeyCode, PhysicalKey};

/// A discrete command produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Re-center the camera on a body.
    Focus(Body),
    /// Close the application.
    Quit,
}

/// Map a physical key press to a command, if any.
///
/// Physical key codes keep the digit row working on any keyboard layout.
#[must_use]
pub fn command_for_key(key: PhysicalKey) -> Option<KeyCommand> {
    match key {
        PhysicalKey::Code(KeyCode::Digit1) => Some(KeyCommand::Focus(Body::Sun)),
        PhysicalKey::Code(KeyCode::Digit2) => Some(KeyCommand::Focus(Body::Planet)),
        PhysicalKey::Code(KeyCode::Digit3) => Some(KeyCommand::Focus(Body::Moon)),
        PhysicalKey::Code(KeyCode::Escape) => Some(KeyCommand::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_focus_bodies_in_order() {
        assert_eq!(
            command_for_key(PhysicalKey::Code(KeyCode::Digit1)),
            Some(KeyCommand::Focus(Body::Sun))
        );
        assert_eq!(
            command_for_key(PhysicalKey::Code(KeyCode::Digit2)),
            Some(KeyCommand::Focus(Body::Planet))
        );
        assert_eq!(
            command_for_key(PhysicalKey::Code(KeyCode::Digit3)),
            Some(KeyCommand::Focus(Body::Moon))
        );
    }

    #[test]
    fn test_escape_quits() {
        assert_eq!(
            command_for_key(PhysicalKey::Code(KeyCode::Escape)),
            Some(KeyCommand::Quit)
        );
    }

    #[test]
    fn test_unbound_keys_do_nothing() {
        assert_eq!(command_for_key(PhysicalKey::Code(KeyCode::KeyW)), None);
        assert_eq!(command_for_key(PhysicalKey::Code(KeyCode::Digit4)), None);
    }
}
