//! The real hardware behind [crate::io]: switches on GPIO, the key LEDs on a PIO-driven WS2812
//! chain, and the host on the other end of the USB cable.
//!
//! The display is a terminal attached to the CDC serial port; each update redraws the same line.

use crate::color::Rgb;
use crate::config::DISPLAY_WIDTH;
use crate::io::{Clock, Display, HostKeyboard, Leds, Switches};
use crate::keymap::{empty_report, key_for_char, report_for, Key, NamedKey};
use crate::scan::KEY_COUNT;
use crate::{DisplayLine, DISPLAY_CHANNEL, REPORTS_CHANNEL};

use embassy_rp::{gpio::Input, peripherals::PIO0, pio_programs::ws2812::PioWs2812};
use embassy_time::{Duration, Instant, Timer};
use smart_leds::RGB8;

pub struct Board<'d> {
    switches: [Input<'d>; KEY_COUNT],
    leds: PioWs2812<'d, PIO0, 0, KEY_COUNT>,
    colors: [RGB8; KEY_COUNT],
}

impl<'d> Board<'d> {
    pub fn new(switches: [Input<'d>; KEY_COUNT], leds: PioWs2812<'d, PIO0, 0, KEY_COUNT>) -> Self {
        Board { switches, leds, colors: [RGB8::default(); KEY_COUNT] }
    }

    async fn show(&mut self, chars: impl Iterator<Item = char>) {
        let mut line = DisplayLine::new();
        let _ = line.push('\r');
        for ch in chars.take(DISPLAY_WIDTH) {
            let _ = line.push(ch);
        }
        while line.chars().count() <= DISPLAY_WIDTH {
            let _ = line.push(' ');
        }
        DISPLAY_CHANNEL.send(line).await;
    }

    async fn press_and_release(&mut self, key: Key) {
        REPORTS_CHANNEL.send(report_for(key)).await;
        REPORTS_CHANNEL.send(empty_report()).await;
    }
}

impl Switches for Board<'_> {
    fn read(&mut self) -> [bool; KEY_COUNT] {
        // pulled up, so a closed switch reads low
        core::array::from_fn(|i| self.switches[i].is_low())
    }
}

impl Leds for Board<'_> {
    fn set_color(&mut self, pixel: usize, color: Rgb) {
        self.colors[pixel] = RGB8::new(color.r, color.g, color.b);
    }

    async fn flush(&mut self) {
        self.leds.write(&self.colors).await;
    }
}

impl Display for Board<'_> {
    async fn clear(&mut self) {
        self.show(core::iter::empty()).await;
    }

    async fn print(&mut self, text: &str) {
        self.show(text.chars()).await;
    }

    async fn scroll(&mut self, text: &str, delay: Duration) {
        // slides in from the right and off to the left
        let steps = text.chars().count() + DISPLAY_WIDTH;
        for start in 0..=steps {
            let padded = core::iter::repeat(' ')
                .take(DISPLAY_WIDTH)
                .chain(text.chars())
                .chain(core::iter::repeat(' '));
            self.show(padded.skip(start)).await;
            Timer::after(delay).await;
        }
    }
}

impl HostKeyboard for Board<'_> {
    async fn send_character(&mut self, ch: char) {
        match key_for_char(ch) {
            Some(key) => self.press_and_release(key).await,
            None => warn!("no key for {}", ch),
        }
    }

    async fn send_key(&mut self, key: NamedKey) {
        self.press_and_release(key.key()).await;
    }
}

impl Clock for Board<'_> {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn pause(&mut self, duration: Duration) {
        Timer::after(duration).await;
    }
}
