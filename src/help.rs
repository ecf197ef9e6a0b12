//! Help mode: types out every chord the keyboard knows, to the display and to the host, showing
//! each character's chord on the keys as it goes. Holding any key stops it early.

use crate::chord::Bits;
use crate::config::{BANNER_PAUSE, RIGHT_HANDED, SCROLL_DELAY, TYPE_OUT_DELAY};
use crate::decode::{Command, COMMAND_TABLE, TITLED_TABLES};
use crate::io::Hardware;
use crate::keyboard::Context;
use crate::keymap::NamedKey;
use crate::processor::Mode;
use crate::state::KeyboardState;
use heapless::{String, Vec};

const INTRO: &str = "Printing help. Hold any key to stop";
const DONE: &str = "Help complete";
const SEPARATOR: &str = "-----------------------";

/// A line of the key diagram printed under each entry.
pub type DiagramLine = String<32>;

/// Somebody held a key down during the tour.
struct Stopped;

pub struct HelpProcessor {
    waiting_for_clear_keys: bool,
}

impl HelpProcessor {
    pub fn new() -> Self {
        HelpProcessor { waiting_for_clear_keys: false }
    }

    pub(crate) async fn start<H: Hardware>(&mut self, ctx: &mut Context<H>) -> Option<Mode> {
        ctx.set_state(KeyboardState::Lower);
        ctx.clear_keys().await;
        ctx.hw.scroll(INTRO, SCROLL_DELAY).await;
        ctx.hw.pause(BANNER_PAUSE).await;
        self.waiting_for_clear_keys = true;
        None
    }

    pub(crate) async fn on_character<H: Hardware>(&mut self, _ctx: &mut Context<H>, ch: char) -> Option<Mode> {
        debug!("help ignoring {}", ch);
        None
    }

    pub(crate) async fn on_tick<H: Hardware>(&mut self, ctx: &mut Context<H>) -> Option<Mode> {
        if !self.waiting_for_clear_keys || ctx.chord_bits() != 0 {
            return None;
        }
        self.waiting_for_clear_keys = false;

        if tour(ctx).await.is_err() {
            info!("help stopped");
        }
        ctx.hw.scroll(DONE, SCROLL_DELAY).await;
        ctx.wait_until_released().await;
        ctx.set_state(KeyboardState::Lower);
        ctx.clear_guides();
        ctx.clear_keys().await;
        Some(Mode::Text)
    }
}

impl Default for HelpProcessor {
    fn default() -> Self {
        Self::new()
    }
}

async fn tour<H: Hardware>(ctx: &mut Context<H>) -> Result<(), Stopped> {
    for (title, table) in TITLED_TABLES {
        check_stop(ctx).await?;
        type_out(ctx, title).await;

        let mut entries: Vec<(Bits, char), 32> = table.iter().copied().collect();
        entries.sort_unstable_by_key(|(_, ch)| *ch);
        for (bits, ch) in entries {
            let mut buf = [0u8; 4];
            print_entry(ctx, ch.encode_utf8(&mut buf), bits).await;
            check_stop(ctx).await?;
        }
    }

    check_stop(ctx).await?;
    type_out(ctx, "Control").await;

    let mut commands: Vec<(Bits, Command), 16> = COMMAND_TABLE.iter().copied().collect();
    commands.sort_unstable_by_key(|(_, command)| command.name());
    for (bits, command) in commands {
        let mut text: String<48> = String::new();
        let _ = text.push_str(command.name());
        let _ = text.push_str(" : ");
        let _ = text.push_str(command.description());
        print_entry(ctx, &text, bits).await;
        check_stop(ctx).await?;
    }
    Ok(())
}

async fn check_stop<H: Hardware>(ctx: &mut Context<H>) -> Result<(), Stopped> {
    ctx.settle().await;
    if ctx.chord_bits() != 0 {
        Err(Stopped)
    } else {
        Ok(())
    }
}

/// One entry: what is typed, then which keys make up its chord.
async fn print_entry<H: Hardware>(ctx: &mut Context<H>, text: &str, bits: Bits) {
    debug!("help entry {=str} {=u8}", text, bits);
    type_out(ctx, text).await;
    let (top, bottom) = key_diagram(bits, RIGHT_HANDED);
    type_out(ctx, &top).await;
    type_out(ctx, &bottom).await;
    type_out(ctx, SEPARATOR).await;
}

/// Types `text` to the host one character at a time, showing each on the display and its chord on
/// the keys, then ends the line.
async fn type_out<H: Hardware>(ctx: &mut Context<H>, text: &str) {
    for ch in text.chars() {
        ctx.print_char(ch).await;
        ctx.show_guide(ch);
        ctx.show_keys().await;
        ctx.hw.send_character(ch).await;
        ctx.hw.pause(TYPE_OUT_DELAY).await;
    }
    ctx.hw.clear().await;
    ctx.hw.send_key(NamedKey::Enter).await;
    ctx.clear_guides();
    ctx.restore_colors();
}

/// Draws a chord as two rows of `[X] ` / `[ ] ` boxes, roughly where the keys sit under the hand:
/// the control and thumb keys on the bottom row, the four finger keys on the top row.
pub fn key_diagram(bits: Bits, right_handed: bool) -> (DiagramLine, DiagramLine) {
    let mut top = DiagramLine::new();
    let mut bottom = DiagramLine::new();
    let order: [Bits; 6] = if right_handed { [1, 2, 4, 8, 16, 32] } else { [32, 16, 8, 4, 2, 1] };
    if right_handed {
        let _ = top.push_str("        ");
    } else {
        let _ = bottom.push_str("                ");
    }
    for bit in order {
        let cell = if bits & bit == 0 { "[ ] " } else { "[X] " };
        let line = if bit < 4 { &mut bottom } else { &mut top };
        let _ = line.push_str(cell);
    }
    (top, bottom)
}
