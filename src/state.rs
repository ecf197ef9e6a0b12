//! Which class of character the keyboard is currently producing. Independent of the operating
//! [crate::processor::Mode].

use crate::color::{self, Rgb};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyboardState {
    Upper,
    #[default]
    Lower,
    Number,
    Symbol,
}

impl KeyboardState {
    /// Color of every released key while in this state.
    pub const fn base_color(self) -> Rgb {
        match self {
            KeyboardState::Upper => color::YELLOW,
            KeyboardState::Lower => color::BLUE,
            KeyboardState::Number => color::GREEN,
            KeyboardState::Symbol => color::MAGENTA,
        }
    }

    /// Caps lock. Only flips between the two letter states; numbers and symbols are unaffected.
    pub const fn toggled_caps(self) -> Self {
        match self {
            KeyboardState::Upper => KeyboardState::Lower,
            KeyboardState::Lower => KeyboardState::Upper,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_toggle_flips_letter_states() {
        assert_eq!(KeyboardState::Lower.toggled_caps(), KeyboardState::Upper);
        assert_eq!(KeyboardState::Upper.toggled_caps(), KeyboardState::Lower);
    }

    #[test]
    fn caps_toggle_ignored_for_numbers_and_symbols() {
        assert_eq!(KeyboardState::Number.toggled_caps(), KeyboardState::Number);
        assert_eq!(KeyboardState::Symbol.toggled_caps(), KeyboardState::Symbol);
    }

    #[test]
    fn even_number_of_toggles_is_identity() {
        for start in [KeyboardState::Upper, KeyboardState::Lower, KeyboardState::Number, KeyboardState::Symbol] {
            let mut state = start;
            for _ in 0..6 {
                state = state.toggled_caps();
            }
            assert_eq!(state, start);
        }
    }

    #[test]
    fn every_state_has_its_own_color() {
        let colors = [
            KeyboardState::Upper.base_color(),
            KeyboardState::Lower.base_color(),
            KeyboardState::Number.base_color(),
            KeyboardState::Symbol.base_color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
