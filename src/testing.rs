//! In-memory hardware for the unit tests, with a virtual clock that only moves when paused.

use crate::chord::Bits;
use crate::color::{self, Rgb};
use crate::config::DEBOUNCE_COUNT;
use crate::io::{Clock, Display, HostKeyboard, Leds, Switches};
use crate::keyboard::Keyboard;
use crate::keymap::NamedKey;
use crate::scan::{KEY_COUNT, SWITCHES};
use embassy_time::{Duration, Instant};
use std::string::String;
use std::vec::Vec;

pub type Kb = Keyboard<MockHardware>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sent {
    Character(char),
    Key(NamedKey),
}

pub struct MockHardware {
    /// Current switch levels, `true` while closed.
    pub raw: [bool; KEY_COUNT],
    /// Switch changes to apply once the clock reaches them: (ms, key index, closed).
    scheduled: Vec<(u64, usize, bool)>,
    now: Instant,
    pending: [Rgb; KEY_COUNT],
    /// LED colors as of the last flush.
    pub shown: [Rgb; KEY_COUNT],
    /// What the display currently shows.
    pub display: String,
    pub scrolled: Vec<String>,
    pub sent: Vec<Sent>,
    pub named: Vec<NamedKey>,
}

impl MockHardware {
    pub fn new() -> Self {
        MockHardware {
            raw: [false; KEY_COUNT],
            scheduled: Vec::new(),
            now: Instant::from_millis(0),
            pending: [color::BLACK; KEY_COUNT],
            shown: [color::BLACK; KEY_COUNT],
            display: String::new(),
            scrolled: Vec::new(),
            sent: Vec::new(),
            named: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now.as_millis()
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }

    pub fn schedule_ms(&mut self, at: u64, key: usize, closed: bool) {
        self.scheduled.push((at, key, closed));
    }

    /// Characters sent to the host, ignoring named keys.
    pub fn typed(&self) -> String {
        self.sent
            .iter()
            .filter_map(|sent| match sent {
                Sent::Character(ch) => Some(*ch),
                Sent::Key(_) => None,
            })
            .collect()
    }

    /// Characters sent to the host, with Enter shown as a newline.
    pub fn transcript(&self) -> String {
        self.sent
            .iter()
            .filter_map(|sent| match sent {
                Sent::Character(ch) => Some(*ch),
                Sent::Key(NamedKey::Enter) => Some('\n'),
                Sent::Key(_) => None,
            })
            .collect()
    }
}

impl Switches for MockHardware {
    fn read(&mut self) -> [bool; KEY_COUNT] {
        let now = self.now_ms();
        let raw = &mut self.raw;
        self.scheduled.retain(|(at, key, closed)| {
            if *at <= now {
                raw[*key] = *closed;
                false
            } else {
                true
            }
        });
        self.raw
    }
}

impl Leds for MockHardware {
    fn set_color(&mut self, pixel: usize, color: Rgb) {
        self.pending[pixel] = color;
    }

    async fn flush(&mut self) {
        self.shown = self.pending;
    }
}

impl Display for MockHardware {
    async fn clear(&mut self) {
        self.display.clear();
    }

    async fn print(&mut self, text: &str) {
        self.display = text.into();
    }

    async fn scroll(&mut self, text: &str, _delay: Duration) {
        self.scrolled.push(text.into());
        self.display.clear();
    }
}

impl HostKeyboard for MockHardware {
    async fn send_character(&mut self, ch: char) {
        self.sent.push(Sent::Character(ch));
    }

    async fn send_key(&mut self, key: NamedKey) {
        self.sent.push(Sent::Key(key));
        self.named.push(key);
    }
}

impl Clock for MockHardware {
    fn now(&self) -> Instant {
        self.now
    }

    async fn pause(&mut self, duration: Duration) {
        self.now += duration;
    }
}

/// A keyboard that has been through its power-up sequence.
pub fn started() -> Kb {
    let mut kb = Keyboard::new(MockHardware::new());
    embassy_futures::block_on(kb.start());
    kb
}

pub fn tick(kb: &mut Kb) {
    embassy_futures::block_on(kb.update());
}

fn set_keys(kb: &mut Kb, bits: &[Bits], closed: bool) {
    let mask = bits.iter().fold(0u8, |acc, b| acc | *b);
    for (idx, switch) in SWITCHES.iter().enumerate() {
        if mask & switch.bit != 0 {
            kb.hardware_mut().raw[idx] = closed;
        }
    }
    for _ in 0..DEBOUNCE_COUNT {
        tick(kb);
    }
}

/// Holds down the keys making up each of `bits`, all in the same scan, until debounced.
pub fn press(kb: &mut Kb, bits: &[Bits]) {
    set_keys(kb, bits, true);
}

/// Lets go of the keys making up each of `bits`, all in the same scan, until debounced.
pub fn release(kb: &mut Kb, bits: &[Bits]) {
    set_keys(kb, bits, false);
}

/// Presses and releases all the keys of a chord together.
pub fn chord(kb: &mut Kb, bits: Bits) {
    press(kb, &[bits]);
    release(kb, &[bits]);
}
