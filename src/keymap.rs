//! Maps the characters and named keys the chord keyboard produces onto USB HID key codes, for a
//! host configured with a UK layout.
//!
//! Used by the firmware's host keyboard sink (see [crate::io::HostKeyboard]) to build the
//! [KeyboardReport]s which [crate::usb] sends out.

use usbd_hid::descriptor::KeyboardReport;

pub type HidKeyCode = u8;
pub type Modifiers = u8;
pub type Key = (HidKeyCode, Modifiers);

/// The subset of the USB HID keyboard usage page that the keymap needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyCode {
    A = 0x04,
    Kc1 = 0x1E,
    Kc2 = 0x1F,
    Kc3 = 0x20,
    Kc4 = 0x21,
    Kc5 = 0x22,
    Kc6 = 0x23,
    Kc7 = 0x24,
    Kc8 = 0x25,
    Kc9 = 0x26,
    Kc0 = 0x27,
    Enter = 0x28,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    LeftBracket = 0x2F,
    RightBracket = 0x30,
    NonUsHash = 0x32,
    Semicolon = 0x33,
    Quote = 0x34,
    Grave = 0x35,
    Comma = 0x36,
    Dot = 0x37,
    Slash = 0x38,
    Right = 0x4F,
    Left = 0x50,
    NonUsBackslash = 0x64,
}

use KeyCode::*;

const LEFT_SHIFT: Modifiers = 0x02;

/// Non-printable keys the keyboard can send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NamedKey {
    Backspace,
    Enter,
    Left,
    Right,
}

impl NamedKey {
    pub const fn key(self) -> Key {
        match self {
            NamedKey::Backspace => k(Backspace),
            NamedKey::Enter => k(Enter),
            NamedKey::Left => k(Left),
            NamedKey::Right => k(Right),
        }
    }
}

/// A plain key
const fn k(code: KeyCode) -> Key {
    (code as u8, 0)
}

/// A key typed while holding left-shift
const fn shift(code: KeyCode) -> Key {
    (code as u8, LEFT_SHIFT)
}

/// Key code of a letter; `A` through `Z` are contiguous.
const fn letter(lower: u8) -> HidKeyCode {
    A as u8 + (lower - b'a')
}

/// Keys to type `ch` on a UK layout, or [None] for characters the layout has no key for.
pub const fn key_for_char(ch: char) -> Option<Key> {
    let key = match ch {
        'a'..='z' => (letter(ch as u8), 0),
        'A'..='Z' => (letter(ch.to_ascii_lowercase() as u8), LEFT_SHIFT),
        '1' => k(Kc1),
        '2' => k(Kc2),
        '3' => k(Kc3),
        '4' => k(Kc4),
        '5' => k(Kc5),
        '6' => k(Kc6),
        '7' => k(Kc7),
        '8' => k(Kc8),
        '9' => k(Kc9),
        '0' => k(Kc0),
        '!' => shift(Kc1),
        '"' => shift(Kc2),
        '£' => shift(Kc3),
        '$' => shift(Kc4),
        '%' => shift(Kc5),
        '^' => shift(Kc6),
        '&' => shift(Kc7),
        '*' => shift(Kc8),
        '(' => shift(Kc9),
        ')' => shift(Kc0),
        '\n' => k(Enter),
        '\t' => k(Tab),
        ' ' => k(Space),
        '-' => k(Minus),
        '_' => shift(Minus),
        '=' => k(Equal),
        '+' => shift(Equal),
        '[' => k(LeftBracket),
        '{' => shift(LeftBracket),
        ']' => k(RightBracket),
        '}' => shift(RightBracket),
        '#' => k(NonUsHash),
        '~' => shift(NonUsHash),
        ';' => k(Semicolon),
        ':' => shift(Semicolon),
        '\'' => k(Quote),
        '@' => shift(Quote),
        '`' => k(Grave),
        ',' => k(Comma),
        '<' => shift(Comma),
        '.' => k(Dot),
        '>' => shift(Dot),
        '/' => k(Slash),
        '?' => shift(Slash),
        '\\' => k(NonUsBackslash),
        '|' => shift(NonUsBackslash),
        _ => return None,
    };
    Some(key)
}

/// A report holding down just `key`.
pub fn report_for((keycode, modifier): Key) -> KeyboardReport {
    KeyboardReport { modifier, reserved: 0, leds: 0, keycodes: [keycode, 0, 0, 0, 0, 0] }
}

/// A report with every key released.
pub fn empty_report() -> KeyboardReport {
    KeyboardReport::default()
}
