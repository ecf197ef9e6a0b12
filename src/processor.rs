//! The operating modes, and the processor behind each one. Every processor has the same three
//! hooks; any of them may ask for a switch to another mode by returning it.

use crate::game::GameProcessor;
use crate::help::HelpProcessor;
use crate::io::Hardware;
use crate::keyboard::Context;
use crate::state::KeyboardState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Text,
    Help,
    Game,
}

pub enum Processor {
    Text(TextProcessor),
    Help(HelpProcessor),
    Game(GameProcessor),
}

impl Processor {
    pub fn new(mode: Mode) -> Self {
        match mode {
            Mode::Text => Processor::Text(TextProcessor),
            Mode::Help => Processor::Help(HelpProcessor::new()),
            Mode::Game => Processor::Game(GameProcessor::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Processor::Text(_) => Mode::Text,
            Processor::Help(_) => Mode::Help,
            Processor::Game(_) => Mode::Game,
        }
    }

    pub async fn start<H: Hardware>(&mut self, ctx: &mut Context<H>) -> Option<Mode> {
        match self {
            Processor::Text(text) => text.start(ctx).await,
            Processor::Help(help) => help.start(ctx).await,
            Processor::Game(game) => game.start(ctx).await,
        }
    }

    pub async fn on_character<H: Hardware>(&mut self, ctx: &mut Context<H>, ch: char) -> Option<Mode> {
        match self {
            Processor::Text(text) => text.on_character(ctx, ch).await,
            Processor::Help(help) => help.on_character(ctx, ch).await,
            Processor::Game(game) => game.on_character(ctx, ch).await,
        }
    }

    /// Periodic work, once per pass of the main loop.
    pub async fn on_tick<H: Hardware>(&mut self, ctx: &mut Context<H>) -> Option<Mode> {
        match self {
            Processor::Text(_) => None,
            Processor::Help(help) => help.on_tick(ctx).await,
            Processor::Game(game) => game.on_tick(ctx).await,
        }
    }
}

/// Plain typing: every character goes to the display and to the host.
pub struct TextProcessor;

impl TextProcessor {
    async fn start<H: Hardware>(&mut self, ctx: &mut Context<H>) -> Option<Mode> {
        ctx.hw.clear().await;
        ctx.set_state(KeyboardState::Lower);
        None
    }

    async fn on_character<H: Hardware>(&mut self, ctx: &mut Context<H>, ch: char) -> Option<Mode> {
        ctx.print_char(ch).await;
        ctx.hw.send_character(ch).await;
        None
    }
}
