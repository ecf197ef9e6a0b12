//! The six physical keys: their wiring, debouncing, and the color each one's LED should show.
//! Edges found here are fed into [crate::chord::ChordAccumulator] by [crate::keyboard].

use crate::chord::Bits;
use crate::color::{self, Rgb};
use crate::config::{DEBOUNCE_COUNT, RIGHT_HANDED};

pub const KEY_COUNT: usize = 6;

/// How one key is wired up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Switch {
    /// GPIO number the switch pulls low.
    pub pin: u8,
    /// Position of the key's LED on the strip.
    pub pixel: usize,
    /// The key's bit in a chord.
    pub bit: Bits,
}

const fn switch(pin: u8, pixel: usize, bit: Bits) -> Switch {
    Switch { pin, pixel, bit }
}

/// Switch layout, in scan order. Only the bits differ between hands: the control key is always
/// first, followed by thumb, index, middle, ring and little fingers.
pub const fn switches(right_handed: bool) -> [Switch; KEY_COUNT] {
    if right_handed {
        [switch(15, 0, 1), switch(14, 1, 2), switch(13, 2, 4), switch(12, 3, 8), switch(11, 4, 16), switch(10, 5, 32)]
    } else {
        [switch(15, 0, 32), switch(14, 1, 16), switch(13, 2, 8), switch(12, 3, 4), switch(11, 4, 2), switch(10, 5, 1)]
    }
}

pub const SWITCHES: [Switch; KEY_COUNT] = switches(RIGHT_HANDED);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// Filters contact bounce out of one switch. The raw level has to disagree with the stable level
/// for [DEBOUNCE_COUNT] samples in a row before the stable level follows it.
#[derive(Default)]
pub struct Debouncer {
    pressed: bool,
    count: u8,
}

impl Debouncer {
    /// Starts out already settled on `pressed`, so that a key held at power-up doesn't produce an
    /// edge.
    pub const fn settled(pressed: bool) -> Self {
        Debouncer { pressed, count: 0 }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn update(&mut self, raw_pressed: bool) -> Option<Edge> {
        if raw_pressed == self.pressed {
            self.count = 0;
            return None;
        }
        self.count += 1;
        if self.count < DEBOUNCE_COUNT {
            return None;
        }
        self.count = 0;
        self.pressed = raw_pressed;
        Some(if raw_pressed { Edge::Pressed } else { Edge::Released })
    }
}

pub struct Key {
    pub switch: Switch,
    debounce: Debouncer,
    /// Part of the current guide overlay.
    pub guide: bool,
    pub up_color: Rgb,
    pub down_color: Rgb,
    pub guide_color: Rgb,
}

impl Key {
    pub const fn new(switch: Switch, up_color: Rgb) -> Self {
        Key {
            switch,
            debounce: Debouncer::settled(false),
            guide: false,
            up_color,
            down_color: color::KEY_DOWN,
            guide_color: color::KEY_GUIDE,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.debounce.is_pressed()
    }

    pub fn sample(&mut self, raw_pressed: bool) -> Option<Edge> {
        self.debounce.update(raw_pressed)
    }

    /// The color this key's LED should be showing right now.
    pub fn color(&self) -> Rgb {
        if self.is_pressed() {
            self.down_color
        } else if self.guide {
            self.guide_color
        } else {
            self.up_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(debounce: &mut Debouncer, raw: bool) -> Option<Edge> {
        let mut edge = None;
        for _ in 0..DEBOUNCE_COUNT {
            if let Some(e) = debounce.update(raw) {
                assert!(edge.is_none(), "more than one edge per transition");
                edge = Some(e);
            }
        }
        edge
    }

    #[test]
    fn edges_after_settle_count() {
        let mut debounce = Debouncer::default();
        for _ in 0..DEBOUNCE_COUNT - 1 {
            assert_eq!(debounce.update(true), None);
        }
        assert_eq!(debounce.update(true), Some(Edge::Pressed));
        assert!(debounce.is_pressed());
        assert_eq!(debounce.update(true), None);
        assert_eq!(settle(&mut debounce, false), Some(Edge::Released));
        assert!(!debounce.is_pressed());
    }

    #[test]
    fn bounce_is_filtered() {
        let mut debounce = Debouncer::default();
        for _ in 0..20 {
            assert_eq!(debounce.update(true), None);
            assert_eq!(debounce.update(false), None);
        }
        assert!(!debounce.is_pressed());
    }

    #[test]
    fn settled_key_held_at_boot_has_no_press_edge() {
        let mut debounce = Debouncer::settled(true);
        assert_eq!(settle(&mut debounce, true), None);
        assert_eq!(settle(&mut debounce, false), Some(Edge::Released));
    }

    #[test]
    fn each_switch_has_one_distinct_bit() {
        for right_handed in [true, false] {
            let layout = switches(right_handed);
            let all = layout.iter().fold(0u8, |acc, s| {
                assert_eq!(s.bit.count_ones(), 1);
                assert_eq!(acc & s.bit, 0);
                acc | s.bit
            });
            assert_eq!(all, 0b11_1111);
        }
    }

    #[test]
    fn handedness_mirrors_bits_only() {
        let right = switches(true);
        let left = switches(false);
        for (idx, (r, l)) in right.iter().zip(left.iter()).enumerate() {
            assert_eq!(r.pin, l.pin);
            assert_eq!(r.pixel, l.pixel);
            assert_eq!(l.bit, right[KEY_COUNT - 1 - idx].bit);
        }
    }

    #[test]
    fn pressed_color_overrides_guide_and_base() {
        let mut key = Key::new(SWITCHES[0], color::BLUE);
        assert_eq!(key.color(), color::BLUE);
        key.guide = true;
        assert_eq!(key.color(), color::KEY_GUIDE);
        settle(&mut key.debounce, true);
        assert_eq!(key.color(), color::KEY_DOWN);
    }
}
