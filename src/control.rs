//! Keyboard input → craft velocity steps.
//!
//! Every key *press* message (OS auto-repeat included) applies exactly one
//! acceleration step, so holding a key keeps accelerating at the repeat rate
//! rather than once per frame.  Releases do nothing; damping alone slows the
//! craft.
//!
//! | Key        | Command                |
//! |------------|------------------------|
//! | Arrow Up   | thrust forward         |
//! | Arrow Down | thrust backward        |
//! | A / D      | yaw negative / positive   |
//! | W / S      | pitch negative / positive |
//! | Q / E      | roll negative / positive  |

use crate::craft::{Axis, Craft, Thrust, Turn};
use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;

/// A single velocity step requested by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftCommand {
    Thrust(Thrust),
    Rotate(Axis, Turn),
}

impl CraftCommand {
    pub fn apply(self, craft: &mut Craft) {
        match self {
            CraftCommand::Thrust(t) => craft.apply_thrust(t),
            CraftCommand::Rotate(axis, turn) => craft.apply_rotation(axis, turn),
        }
    }
}

/// Key binding table.
pub fn command_for_key(key: KeyCode) -> Option<CraftCommand> {
    use CraftCommand::{Rotate, Thrust as T};
    Some(match key {
        KeyCode::ArrowUp => T(Thrust::Forward),
        KeyCode::ArrowDown => T(Thrust::Backward),
        KeyCode::KeyA => Rotate(Axis::Yaw, Turn::Negative),
        KeyCode::KeyD => Rotate(Axis::Yaw, Turn::Positive),
        KeyCode::KeyW => Rotate(Axis::Pitch, Turn::Negative),
        KeyCode::KeyS => Rotate(Axis::Pitch, Turn::Positive),
        KeyCode::KeyQ => Rotate(Axis::Roll, Turn::Negative),
        KeyCode::KeyE => Rotate(Axis::Roll, Turn::Positive),
        _ => return None,
    })
}

/// Apply one step per key-press message to the craft.
pub fn keyboard_control_system(
    mut keys: MessageReader<KeyboardInput>,
    mut q: Query<&mut Craft>,
) {
    let Ok(mut craft) = q.single_mut() else {
        keys.clear();
        return;
    };
    for input in keys.read() {
        if input.state != ButtonState::Pressed {
            continue;
        }
        if let Some(cmd) = command_for_key(input.key_code) {
            cmd.apply(&mut craft);
        }
    }
}
