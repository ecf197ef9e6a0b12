//! Ties everything together: scans the keys, resolves chords, and hands characters and commands
//! to whichever [Processor] is active.
//!
//! [Context] is the state shared by all processors (the hardware, keys, chord accumulator and
//! keyboard state). [Keyboard] owns it alongside the active processor, so a processor can be given
//! `&mut Context` while the dispatcher holds on to the processor itself.

use crate::chord::{Bits, Chord, ChordAccumulator};
use crate::color;
use crate::config::{DEBOUNCE_COUNT, SCAN_INTERVAL, SCROLL_DELAY, VERSION};
use crate::decode::{resolve, Command, ReverseLookup, Resolution};
use crate::io::Hardware;
use crate::keymap::NamedKey;
use crate::processor::{Mode, Processor};
use crate::scan::{Edge, Key, KEY_COUNT, SWITCHES};
use crate::state::KeyboardState;
use heapless::{String, Vec};

/// Chords resolved during one scan, in key order.
pub type Chords = Vec<Chord, KEY_COUNT>;

pub struct Context<H> {
    pub hw: H,
    keys: [Key; KEY_COUNT],
    chord: ChordAccumulator,
    state: KeyboardState,
    lookup: ReverseLookup,
}

impl<H: Hardware> Context<H> {
    pub fn new(hw: H) -> Self {
        let up_color = KeyboardState::default().base_color();
        Context {
            hw,
            keys: SWITCHES.map(|switch| Key::new(switch, up_color)),
            chord: ChordAccumulator::new(),
            state: KeyboardState::default(),
            lookup: ReverseLookup::new(),
        }
    }

    pub fn state(&self) -> KeyboardState {
        self.state
    }

    /// Switches character class, and recolors the keys to match.
    pub fn set_state(&mut self, state: KeyboardState) {
        debug!("keyboard state {}", state);
        self.state = state;
        self.restore_colors();
    }

    pub fn toggle_caps(&mut self) {
        self.set_state(self.state.toggled_caps());
    }

    /// Bits of the keys currently held down.
    pub fn chord_bits(&self) -> Bits {
        self.chord.bits()
    }

    pub fn keys(&self) -> &[Key; KEY_COUNT] {
        &self.keys
    }

    /// Samples every switch once, in [SWITCHES] order, and updates the LED colors to match.
    pub fn scan(&mut self) -> Chords {
        let raw = self.hw.read();
        let mut chords = Chords::new();
        for (key, raw_pressed) in self.keys.iter_mut().zip(raw) {
            let bit = key.switch.bit;
            match key.sample(raw_pressed) {
                Some(Edge::Pressed) => {
                    trace!("key {=u8} down", bit);
                    self.chord.press(bit);
                }
                Some(Edge::Released) => {
                    trace!("key {=u8} up", bit);
                    if let Some(chord) = self.chord.release(bit) {
                        // at most one release per key per scan, so this can't overflow
                        let _ = chords.push(chord);
                    }
                }
                None => {}
            }
        }
        self.paint_keys();
        chords
    }

    /// Scans enough times for a change of any switch to get through debouncing, dropping any chord
    /// that resolves meanwhile.
    pub async fn settle(&mut self) {
        for _ in 0..DEBOUNCE_COUNT {
            for chord in self.scan() {
                debug!("dropped chord {=u8}", chord.0);
            }
            self.hw.pause(SCAN_INTERVAL).await;
        }
    }

    /// Blocks until every key is up, dropping any chord that resolves meanwhile. Never times out.
    pub async fn wait_until_released(&mut self) {
        self.settle().await;
        while self.chord.bits() != 0 {
            self.settle().await;
        }
    }

    fn paint_keys(&mut self) {
        for key in &self.keys {
            self.hw.set_color(key.switch.pixel, key.color());
        }
    }

    pub async fn show_keys(&mut self) {
        self.paint_keys();
        self.hw.flush().await;
    }

    /// Paints every LED plain base color of the current state and shows it immediately.
    pub async fn clear_keys(&mut self) {
        let base = self.state.base_color();
        for key in &self.keys {
            self.hw.set_color(key.switch.pixel, base);
        }
        self.hw.flush().await;
    }

    pub fn clear_guides(&mut self) {
        for key in &mut self.keys {
            key.guide = false;
        }
    }

    pub fn restore_colors(&mut self) {
        let base = self.state.base_color();
        for key in &mut self.keys {
            key.up_color = base;
        }
    }

    /// Highlights the keys of the chord for `ch`, on the base color of the state needed to type
    /// it. Returns `false`, with guides cleared, if `ch` can't be typed.
    pub fn show_guide(&mut self, ch: char) -> bool {
        let Some(def) = self.lookup.lookup(ch) else {
            self.clear_guides();
            return false;
        };
        let base = def.state.base_color();
        for key in &mut self.keys {
            key.up_color = base;
            key.guide = def.bits & key.switch.bit != 0;
        }
        true
    }

    pub async fn print_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.hw.print(ch.encode_utf8(&mut buf)).await;
    }
}

pub struct Keyboard<H> {
    ctx: Context<H>,
    processor: Processor,
}

impl<H: Hardware> Keyboard<H> {
    pub fn new(hw: H) -> Self {
        Keyboard { ctx: Context::new(hw), processor: Processor::new(Mode::Text) }
    }

    pub fn mode(&self) -> Mode {
        self.processor.mode()
    }

    pub fn state(&self) -> KeyboardState {
        self.ctx.state()
    }

    pub fn context(&self) -> &Context<H> {
        &self.ctx
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    #[cfg(test)]
    pub(crate) fn processor_mut(&mut self) -> &mut Processor {
        &mut self.processor
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.ctx.hw
    }

    /// Power-up sequence: greets, waits for every switch to be open, then enters text mode.
    pub async fn start(&mut self) {
        for key in &self.ctx.keys {
            self.ctx.hw.set_color(key.switch.pixel, color::BLUE);
        }
        self.ctx.hw.flush().await;

        let mut hello: String<24> = String::new();
        let _ = hello.push_str("PICO Chord ");
        let _ = hello.push_str(VERSION);
        info!("{=str}", hello.as_str());
        self.ctx.hw.scroll(&hello, SCROLL_DELAY).await;

        while self.ctx.hw.read().iter().any(|closed| *closed) {
            self.ctx.hw.pause(SCAN_INTERVAL).await;
        }
        self.start_mode(Mode::Text).await;
        self.ctx.show_keys().await;
    }

    /// One pass of the main loop.
    pub async fn update(&mut self) {
        for chord in self.ctx.scan() {
            self.handle_chord(chord).await;
        }
        let next = self.processor.on_tick(&mut self.ctx).await;
        self.transition(next).await;
        self.ctx.show_keys().await;
    }

    /// Makes `mode` the active one and runs its start hook, following on to any further mode the
    /// start hook asks for.
    pub async fn start_mode(&mut self, mode: Mode) {
        let mut next = Some(mode);
        while let Some(mode) = next {
            info!("starting {} mode", mode);
            self.processor = Processor::new(mode);
            next = self.processor.start(&mut self.ctx).await;
        }
    }

    async fn transition(&mut self, next: Option<Mode>) {
        if let Some(mode) = next {
            self.start_mode(mode).await;
        }
    }

    async fn handle_chord(&mut self, Chord(bits): Chord) {
        match resolve(bits, self.ctx.state()) {
            Resolution::Character(ch) => {
                debug!("chord {=u8} typed {}", bits, ch);
                let next = self.processor.on_character(&mut self.ctx, ch).await;
                self.transition(next).await;
            }
            Resolution::Command(command) => self.run_command(command).await,
            Resolution::Nothing => debug!("chord {=u8} does nothing", bits),
        }
    }

    async fn run_command(&mut self, command: Command) {
        info!("command {=str}", command.name());
        match command {
            Command::ToggleCaps => self.ctx.toggle_caps(),
            Command::Backspace => self.ctx.hw.send_key(NamedKey::Backspace).await,
            Command::SetSymbolMode => self.ctx.set_state(KeyboardState::Symbol),
            Command::SetTextMode => {
                // in the game this only gets back to letters, otherwise the player couldn't leave
                // numbers or symbols without ending it
                if self.mode() == Mode::Game {
                    self.ctx.set_state(KeyboardState::Lower);
                } else {
                    self.start_mode(Mode::Text).await;
                }
            }
            Command::SetNumberMode => self.ctx.set_state(KeyboardState::Number),
            Command::CursorRight => self.ctx.hw.send_key(NamedKey::Right).await,
            Command::Enter => self.ctx.hw.send_key(NamedKey::Enter).await,
            Command::CursorLeft => self.ctx.hw.send_key(NamedKey::Left).await,
            Command::StartHelp => self.start_mode(Mode::Help).await,
            Command::StartGame => self.start_mode(Mode::Game).await,
        }
    }
}
