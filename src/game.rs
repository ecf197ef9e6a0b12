//! Typing practice. The display shows the next character of a practice phrase; typing it scores
//! points and moves on, typing anything else ends the game. Dawdle and the chord for the
//! character is shown on the keys, for fewer points.

use crate::config::{BANNER_PAUSE, GAME_GUIDE_DELAY, GAME_OVER_PAUSE, GAME_SCORE_ASSISTED, GAME_SCORE_UNASSISTED, SCROLL_DELAY};
use crate::io::Hardware;
use crate::keyboard::Context;
use crate::processor::Mode;
use crate::state::KeyboardState;
use core::fmt::Write;
use embassy_time::Instant;
use heapless::String;

/// Played in order, then round again. All ASCII.
pub const PHRASES: [&str; 8] = [
    "abcdefghijklmnopqrstuvwxyz",
    "the quick brown fox jumps over the lazy dog",
    "Jackdaws love my big sphinx of quartz.",
    "The five boxing wizards jump quickly.",
    "A Capital Idea",
    "1234567890",
    "I am 21 years old",
    "if a<b print(\"hello\")",
];

pub struct GameProcessor {
    phrase: usize,
    position: usize,
    score: u32,
    waiting_for_clear_keys: bool,
    guide_at: Instant,
    guide_shown: bool,
}

impl GameProcessor {
    pub fn new() -> Self {
        GameProcessor {
            phrase: 0,
            position: 0,
            score: 0,
            waiting_for_clear_keys: true,
            guide_at: Instant::MAX,
            guide_shown: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The character the player should type next.
    pub fn expected(&self) -> char {
        PHRASES[self.phrase].as_bytes()[self.position] as char
    }

    /// Whether the current round has shown its guide.
    pub fn is_assisted(&self) -> bool {
        self.guide_shown
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting_for_clear_keys
    }

    fn advance(&mut self) {
        self.position += 1;
        if self.position == PHRASES[self.phrase].len() {
            self.position = 0;
            self.phrase = (self.phrase + 1) % PHRASES.len();
        }
    }

    async fn start_round<H: Hardware>(&mut self, ctx: &mut Context<H>) {
        let ch = self.expected();
        ctx.print_char(ch).await;
        self.guide_at = ctx.hw.now() + GAME_GUIDE_DELAY;
        self.guide_shown = false;
        ctx.clear_guides();
        ctx.restore_colors();
    }

    pub(crate) async fn start<H: Hardware>(&mut self, ctx: &mut Context<H>) -> Option<Mode> {
        ctx.set_state(KeyboardState::Lower);
        ctx.clear_keys().await;
        ctx.hw.scroll("Game starting.....", SCROLL_DELAY).await;
        ctx.hw.pause(BANNER_PAUSE).await;
        *self = GameProcessor::new();
        None
    }

    pub(crate) async fn on_character<H: Hardware>(&mut self, ctx: &mut Context<H>, ch: char) -> Option<Mode> {
        if self.waiting_for_clear_keys {
            debug!("game not started, ignoring {}", ch);
            return None;
        }
        if ch == self.expected() {
            self.score += if self.guide_shown { GAME_SCORE_ASSISTED } else { GAME_SCORE_UNASSISTED };
            debug!("got {}, score {=u32}", ch, self.score);
            self.advance();
            self.start_round(ctx).await;
            return None;
        }

        info!("expected {} got {}, final score {=u32}", self.expected(), ch, self.score);
        let mut message: String<32> = String::new();
        let _ = write!(message, "Game over score {}", self.score);
        ctx.hw.scroll(&message, SCROLL_DELAY).await;
        ctx.hw.pause(GAME_OVER_PAUSE).await;
        ctx.clear_guides();
        // keys grabbed while the score was up mustn't type into text mode
        ctx.wait_until_released().await;
        Some(Mode::Text)
    }

    pub(crate) async fn on_tick<H: Hardware>(&mut self, ctx: &mut Context<H>) -> Option<Mode> {
        if self.waiting_for_clear_keys {
            if ctx.chord_bits() == 0 {
                self.waiting_for_clear_keys = false;
                self.start_round(ctx).await;
            }
        } else if !self.guide_shown && ctx.hw.now() >= self.guide_at {
            let ch = self.expected();
            if !ctx.show_guide(ch) {
                debug!("no chord for {}", ch);
            }
            self.guide_shown = true;
        }
        None
    }
}

impl Default for GameProcessor {
    fn default() -> Self {
        Self::new()
    }
}
