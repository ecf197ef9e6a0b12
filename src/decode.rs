//! Chord tables: what each chord types in each [KeyboardState], which chords are commands, and
//! the reverse direction (how to type a given character), used for guides.

use crate::chord::Bits;
use crate::state::KeyboardState;
use heapless::LinearMap;

/// Chord to character, for one class of characters.
pub type DecodeTable = [(Bits, char)];

/// Letters, space and basic punctuation. Shared by [KeyboardState::Upper] and
/// [KeyboardState::Lower], upper case being applied after lookup.
pub const TEXT_TABLE: &DecodeTable = &[
    (12, 'a'), (56, 'b'), (10, 'c'), (14, 'd'), (4, 'e'), (30, 'f'), (48, 'g'), (34, 'h'),
    (6, 'i'), (50, 'j'), (18, 'k'), (38, 'l'), (60, 'm'), (24, 'n'), (8, 'o'), (62, 'p'),
    (40, 'q'), (22, 'r'), (16, 's'), (20, 't'), (32, 'u'), (36, 'v'), (54, 'w'), (58, 'x'),
    (26, 'y'), (42, 'z'), (2, ' '), (52, ','), (28, '.'),
];

pub const NUMBER_TABLE: &DecodeTable = &[
    (8, '0'), (2, '1'), (6, '2'), (14, '3'), (30, '4'), (62, '5'), (32, '6'), (48, '7'),
    (56, '8'), (60, '9'), (52, ','), (28, '.'),
];

pub const SYMBOL_TABLE: &DecodeTable = &[
    (2, ' '), (52, ','), (28, '.'), (54, ':'), (50, ';'), (42, '%'), (4, '='), (22, '&'),
    (14, '('), (56, ')'), (16, '$'), (12, '@'), (62, '+'), (34, '#'), (24, '-'), (58, '!'),
    (26, '?'), (18, '/'), (30, '{'), (60, '}'), (10, '['), (40, ']'), (36, '\\'), (20, '*'),
    (6, '<'), (48, '>'),
];

/// Decode tables in the order they are presented by the help tour.
pub const TITLED_TABLES: [(&str, &DecodeTable); 3] = [
    ("Text", TEXT_TABLE),
    ("Numbers", NUMBER_TABLE),
    ("Symbols", SYMBOL_TABLE),
];

pub const fn table_for(state: KeyboardState) -> &'static DecodeTable {
    match state {
        KeyboardState::Upper | KeyboardState::Lower => TEXT_TABLE,
        KeyboardState::Number => NUMBER_TABLE,
        KeyboardState::Symbol => SYMBOL_TABLE,
    }
}

fn decode(table: &DecodeTable, bits: Bits) -> Option<char> {
    table.iter().find(|(b, _)| *b == bits).map(|(_, ch)| *ch)
}

/// Something a control chord does instead of typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    ToggleCaps,
    Backspace,
    SetSymbolMode,
    SetTextMode,
    SetNumberMode,
    CursorRight,
    Enter,
    CursorLeft,
    StartHelp,
    StartGame,
}

impl Command {
    /// Short name, as listed by the help tour.
    pub const fn name(self) -> &'static str {
        match self {
            Command::ToggleCaps => "caps",
            Command::Backspace => "del",
            Command::SetSymbolMode => "sym",
            Command::SetTextMode => "text",
            Command::SetNumberMode => "num",
            Command::CursorRight => "for",
            Command::Enter => "ret",
            Command::CursorLeft => "bak",
            Command::StartHelp => "Help",
            Command::StartGame => "Game",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Command::ToggleCaps => "Toggle CAPS lock",
            Command::Backspace => "Backspace and delete",
            Command::SetSymbolMode => "Set symbol mode (magenta)",
            Command::SetTextMode => "Set text mode (blue)",
            Command::SetNumberMode => "Set numeric mode (green)",
            Command::CursorRight => "Move cursor right",
            Command::Enter => "Enter key",
            Command::CursorLeft => "Move cursor left",
            Command::StartHelp => "Type help information",
            Command::StartGame => "Start the game",
        }
    }
}

/// Only consulted when the chord isn't in the active decode table.
pub const COMMAND_TABLE: &[(Bits, Command)] = &[
    (1, Command::ToggleCaps),
    (13, Command::Backspace),
    (17, Command::SetSymbolMode),
    (21, Command::SetTextMode),
    (25, Command::SetNumberMode),
    (29, Command::CursorRight),
    (44, Command::Enter),
    (57, Command::CursorLeft),
    (33, Command::StartHelp),
    (49, Command::StartGame),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Character(char),
    Command(Command),
    Nothing,
}

/// Works out what a chord means in the given state. The active decode table wins over the command
/// table; chords in neither are ignored.
pub fn resolve(bits: Bits, state: KeyboardState) -> Resolution {
    if let Some(ch) = decode(table_for(state), bits) {
        let ch = if state == KeyboardState::Upper { ch.to_ascii_uppercase() } else { ch };
        return Resolution::Character(ch);
    }
    match COMMAND_TABLE.iter().find(|(b, _)| *b == bits) {
        Some((_, command)) => Resolution::Command(*command),
        None => Resolution::Nothing,
    }
}

/// How to type a character: its chord, and the state the keyboard has to be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDef {
    pub ch: char,
    pub bits: Bits,
    pub state: KeyboardState,
}

const LOOKUP_CAPACITY: usize = 64;

/// Character to chord, built once from the decode tables. Letters are stored lower case; an upper
/// case query is answered with [KeyboardState::Upper].
pub struct ReverseLookup {
    text: LinearMap<char, Bits, LOOKUP_CAPACITY>,
    number: LinearMap<char, Bits, LOOKUP_CAPACITY>,
    symbol: LinearMap<char, Bits, LOOKUP_CAPACITY>,
}

fn reverse(table: &DecodeTable) -> LinearMap<char, Bits, LOOKUP_CAPACITY> {
    let mut map = LinearMap::new();
    for (bits, ch) in table {
        // tables are far smaller than the capacity
        let _ = map.insert(*ch, *bits);
    }
    map
}

impl ReverseLookup {
    pub fn new() -> Self {
        ReverseLookup { text: reverse(TEXT_TABLE), number: reverse(NUMBER_TABLE), symbol: reverse(SYMBOL_TABLE) }
    }

    pub fn lookup(&self, ch: char) -> Option<CharDef> {
        let lower = ch.to_ascii_lowercase();
        if let Some(bits) = self.text.get(&lower) {
            let state = if lower == ch { KeyboardState::Lower } else { KeyboardState::Upper };
            return Some(CharDef { ch, bits: *bits, state });
        }
        if let Some(bits) = self.number.get(&ch) {
            return Some(CharDef { ch, bits: *bits, state: KeyboardState::Number });
        }
        self.symbol.get(&ch).map(|bits| CharDef { ch, bits: *bits, state: KeyboardState::Symbol })
    }
}

impl Default for ReverseLookup {
    fn default() -> Self {
        Self::new()
    }
}
