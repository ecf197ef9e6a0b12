//! Colors for the LEDs under the keys.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const YELLOW: Rgb = Rgb::new(255, 150, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
pub const GREY: Rgb = Rgb::new(10, 10, 10);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Shown on a key while it is held down.
pub const KEY_DOWN: Rgb = RED;
/// Shown on a key that is part of a guide overlay.
pub const KEY_GUIDE: Rgb = GREY;
