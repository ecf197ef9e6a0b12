//! What the chord engine needs from the hardware around it. The firmware implements these over
//! GPIO, PIO and USB; the tests implement them in memory.

#![allow(async_fn_in_trait)]

use crate::color::Rgb;
use crate::keymap::NamedKey;
use crate::scan::KEY_COUNT;
use embassy_time::{Duration, Instant};

pub trait Switches {
    /// Raw (undebounced) level of each switch in [crate::scan::SWITCHES] order, `true` while
    /// closed.
    fn read(&mut self) -> [bool; KEY_COUNT];
}

pub trait Leds {
    /// Takes effect at the next [Leds::flush].
    fn set_color(&mut self, pixel: usize, color: Rgb);
    async fn flush(&mut self);
}

pub trait Display {
    async fn clear(&mut self);
    /// Shows a short text; anything beyond the display's width is cut off.
    async fn print(&mut self, text: &str);
    /// Scrolls a longer message across the display, returning once it has gone by.
    async fn scroll(&mut self, text: &str, delay: Duration);
}

/// The computer the keyboard is plugged into.
pub trait HostKeyboard {
    async fn send_character(&mut self, ch: char);
    async fn send_key(&mut self, key: NamedKey);
}

pub trait Clock {
    fn now(&self) -> Instant;
    async fn pause(&mut self, duration: Duration);
}

pub trait Hardware: Switches + Leds + Display + HostKeyboard + Clock {}

impl<T: Switches + Leds + Display + HostKeyboard + Clock> Hardware for T {}
