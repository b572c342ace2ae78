//! Keyboard bindings for the visual parameters and playback.

use log::info;
use winit::keyboard::KeyCode;

use crate::params::{ParameterKnob, VisualParameters};

/// Action bound to a key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    TogglePlayback,
    Quit,
    CycleColor,
    Adjust(ParameterKnob, f32),
}

/// Map a pressed key to its action
pub fn action_for_key(key: KeyCode) -> Option<ControlAction> {
    use ControlAction::*;
    use ParameterKnob::*;

    let action = match key {
        KeyCode::Space => TogglePlayback,
        KeyCode::Escape => Quit,
        KeyCode::KeyC => CycleColor,
        KeyCode::ArrowUp => Adjust(Speed, 0.5),
        KeyCode::ArrowDown => Adjust(Speed, -0.5),
        KeyCode::KeyQ => Adjust(SpikeFrequency, 0.5),
        KeyCode::KeyA => Adjust(SpikeFrequency, -0.5),
        KeyCode::KeyW => Adjust(SpikeLength, 1.0),
        KeyCode::KeyS => Adjust(SpikeLength, -1.0),
        KeyCode::KeyE => Adjust(LowFrequencySensitivity, 1.0),
        KeyCode::KeyD => Adjust(LowFrequencySensitivity, -1.0),
        KeyCode::KeyR => Adjust(HighFrequencySensitivity, 1.0),
        KeyCode::KeyF => Adjust(HighFrequencySensitivity, -1.0),
        _ => return None,
    };
    Some(action)
}

/// Apply a parameter action. Returns false for actions handled elsewhere.
pub fn apply(action: ControlAction, params: &mut VisualParameters) -> bool {
    match action {
        ControlAction::CycleColor => {
            params.sphere_color = params.sphere_color.next_in_palette();
            info!("Sphere Color: {}", params.sphere_color);
            true
        }
        ControlAction::Adjust(knob, delta) => {
            let value = params.adjust(knob, delta);
            info!("{}: {:.1}", knob.name(), value);
            true
        }
        ControlAction::TogglePlayback | ControlAction::Quit => false,
    }
}

/// Help text listing the bindings
pub const HELP: &str = "\
Space        play / pause
Up / Down    rotational speed
Q / A        spike frequency
W / S        spike length
E / D        low frequency sensitivity
R / F        high frequency sensitivity
C            cycle sphere color
Esc          quit
Drop a WAV file on the window to load it";
