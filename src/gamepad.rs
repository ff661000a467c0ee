use std::path::PathBuf;

use evdev::{AbsoluteAxisType, Device, Key};

use crate::error::Error;
use crate::sampler::Source;

/// Buttons packed into the wire bitmask, bit 0 first.
const BUTTON_BITS: [Key; 13] = [
    Key::BTN_SOUTH,
    Key::BTN_EAST,
    Key::BTN_WEST,
    Key::BTN_NORTH,
    Key::BTN_TL,
    Key::BTN_TR,
    Key::BTN_TL2,
    Key::BTN_TR2,
    Key::BTN_SELECT,
    Key::BTN_START,
    Key::BTN_MODE,
    Key::BTN_THUMBL,
    Key::BTN_THUMBR,
];

pub const AXIS_COUNT: usize = 6;

/// Axes sampled each tick, in slot order: left stick, left trigger,
/// right stick, right trigger.
const AXIS_SLOTS: [AbsoluteAxisType; AXIS_COUNT] = [
    AbsoluteAxisType::ABS_X,
    AbsoluteAxisType::ABS_Y,
    AbsoluteAxisType::ABS_Z,
    AbsoluteAxisType::ABS_RX,
    AbsoluteAxisType::ABS_RY,
    AbsoluteAxisType::ABS_RZ,
];

/// One tick's worth of control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub buttons: u16,
    pub axes: [i16; AXIS_COUNT],
}

pub struct Gamepad {
    dev: Device,
}

impl Gamepad {
    /// Opens the `index`-th gamepad-capable input node. Nodes qualify by
    /// advertising BTN_SOUTH and are ordered by path so the index is stable.
    pub fn open(index: usize) -> Result<Self, Error> {
        let mut pads: Vec<(PathBuf, Device)> = evdev::enumerate()
            .filter(|(_, dev)| {
                dev.supported_keys()
                    .map(|keys| keys.contains(Key::BTN_SOUTH))
                    .unwrap_or(false)
            })
            .collect();
        pads.sort_by(|a, b| a.0.cmp(&b.0));

        match pads.into_iter().nth(index) {
            Some((path, dev)) => {
                log::info!(
                    "gamepad {}: {} ({})",
                    index,
                    dev.name().unwrap_or("unknown"),
                    path.display()
                );
                Ok(Self { dev })
            }
            None => Err(Error::GamepadNotFound(index)),
        }
    }
}

impl Source for Gamepad {
    /// Reads the current button and axis state straight from the kernel.
    /// Fails once the device goes away; the caller treats that as fatal.
    fn sample(&self) -> Result<Sample, Error> {
        let keys = self.dev.get_key_state().map_err(Error::GamepadRead)?;
        let abs = self.dev.get_abs_state().map_err(Error::GamepadRead)?;

        let buttons = pack_buttons(|key| keys.contains(key));

        let mut axes = [0i16; AXIS_COUNT];
        for (slot, axis) in AXIS_SLOTS.iter().enumerate() {
            axes[slot] = clamp_axis(abs[axis.0 as usize].value);
        }

        Ok(Sample { buttons, axes })
    }
}

fn pack_buttons<F: Fn(Key) -> bool>(pressed: F) -> u16 {
    let mut mask = 0u16;
    for (bit, &key) in BUTTON_BITS.iter().enumerate() {
        if pressed(key) {
            mask |= 1 << bit;
        }
    }
    mask
}

/// The wire carries 16-bit values; devices may report wider ranges.
fn clamp_axis(raw: i32) -> i16 {
    raw.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}
