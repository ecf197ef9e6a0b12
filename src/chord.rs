//! Turns individual key presses and releases into one resolved chord per gesture.
//!
//! A gesture is armed by the first press after all keys were up. The chord is captured at the
//! first release of the gesture, and includes every key still held at that moment; keys pressed
//! earlier but already released don't count, and keys released later don't fire again. Releasing
//! the remaining keys is silent until the mask returns to zero, which re-arms for the next chord.

/// Bit mask of keys, one bit per switch (see [crate::scan::Switch::bit]).
pub type Bits = u8;

/// A resolved chord, as the mask of keys held at the first release of a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Chord(pub Bits);

#[derive(Default)]
pub struct ChordAccumulator {
    bits: Bits,
    assembling: bool,
}

impl ChordAccumulator {
    pub const fn new() -> Self {
        ChordAccumulator { bits: 0, assembling: false }
    }

    /// Bits of all keys currently held.
    pub fn bits(&self) -> Bits {
        self.bits
    }

    /// Whether a chord will be resolved at the next release.
    pub fn is_assembling(&self) -> bool {
        self.assembling
    }

    pub fn press(&mut self, bit: Bits) {
        if self.bits == 0 {
            self.assembling = true;
        }
        self.bits |= bit;
    }

    pub fn release(&mut self, bit: Bits) -> Option<Chord> {
        let snapshot = self.bits;
        self.bits &= !bit;
        if self.assembling {
            self.assembling = false;
            Some(Chord(snapshot))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_resolves_to_its_bit() {
        let mut acc = ChordAccumulator::new();
        acc.press(4);
        assert!(acc.is_assembling());
        assert_eq!(acc.release(4), Some(Chord(4)));
        assert_eq!(acc.bits(), 0);
        assert!(!acc.is_assembling());
    }

    #[test]
    fn chord_captured_at_first_release_only() {
        let mut acc = ChordAccumulator::new();
        acc.press(4);
        acc.press(8);
        assert_eq!(acc.release(4), Some(Chord(12)));
        assert_eq!(acc.release(8), None);
        assert_eq!(acc.bits(), 0);
    }

    #[test]
    fn chord_is_not_the_maximal_set() {
        // 1+2+4 held, release 1 -> chord 7; then pressing 8 while 2 and 4 are still down doesn't
        // re-arm, so nothing fires until everything has been let go
        let mut acc = ChordAccumulator::new();
        acc.press(1);
        acc.press(2);
        acc.press(4);
        assert_eq!(acc.release(1), Some(Chord(7)));
        acc.press(8);
        assert_eq!(acc.release(2), None);
        assert_eq!(acc.release(4), None);
        assert_eq!(acc.release(8), None);

        acc.press(16);
        assert_eq!(acc.release(16), Some(Chord(16)));
    }

    #[test]
    fn keys_released_before_first_release_of_others_are_excluded() {
        // release order decides: the snapshot is only what is held at the first release
        let mut acc = ChordAccumulator::new();
        acc.press(32);
        acc.press(16);
        acc.press(2);
        assert_eq!(acc.release(16), Some(Chord(50)));
        assert_eq!(acc.release(32), None);
        assert_eq!(acc.release(2), None);
    }

    #[test]
    fn mask_is_or_of_held_keys() {
        // walk through a long pseudo-random press/release sequence checking that no bit leaks
        let mut acc = ChordAccumulator::new();
        let mut held = [false; 6];
        let mut seed: u32 = 0x1234_5678;
        let mut events = 0;
        for _ in 0..2000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let idx = ((seed >> 16) % 6) as usize;
            let bit = 1u8 << idx;
            if held[idx] {
                let armed = acc.is_assembling();
                let before = acc.bits();
                let fired = acc.release(bit);
                held[idx] = false;
                assert_eq!(fired.is_some(), armed);
                if let Some(Chord(bits)) = fired {
                    assert_eq!(bits, before);
                    events += 1;
                }
            } else {
                acc.press(bit);
                held[idx] = true;
            }
            let expected = held.iter().enumerate().filter(|(_, h)| **h).fold(0u8, |m, (i, _)| m | 1 << i);
            assert_eq!(acc.bits(), expected);
            if expected == 0 {
                assert!(!acc.is_assembling());
            }
        }
        assert!(events > 0);
    }
}
