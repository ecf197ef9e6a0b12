//! Firmware for a six-key chording keyboard based on the Raspberry Pi Pico, using the
//! [embassy_rp] framework.

#![no_main]
#![no_std]

#[macro_use]
mod fmt;

mod board;
mod chord;
mod color;
mod config;
mod decode;
mod game;
mod help;
mod io;
mod keyboard;
mod keymap;
mod processor;
mod scan;
mod state;
mod usb;

use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    gpio::{Input, Pull},
    peripherals::PIO0,
    pio::{InterruptHandler, Pio},
    pio_programs::ws2812::{PioWs2812, PioWs2812Program},
};
use embassy_sync::channel::Channel;
use embassy_time::Timer;

use defmt_rtt as _;
use panic_reset as _;

macro_rules! switch_pins {
    ($dev:ident; $($pin:ident),*) => {[ $(Input::new($dev.$pin, Pull::Up)),* ]}
}

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Channel for [board] to send keyboard reports to [usb], and ultimately to the host.
pub(crate) static REPORTS_CHANNEL: Channel<RawMutex, usbd_hid::descriptor::KeyboardReport, 8> = Channel::new();
/// Channel for [board] to send display updates to the CDC serial port.
pub(crate) static DISPLAY_CHANNEL: Channel<RawMutex, DisplayLine, 4> = Channel::new();
type RawMutex = embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
/// Fits in a single CDC packet.
pub(crate) type DisplayLine = heapless::String<32>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("PICO Chord {=str}", config::VERSION);

    let usb_driver = embassy_rp::usb::Driver::new(p.USB, usb::Irqs);
    let (usb_device, hid, cdc) = usb::get_device(usb_driver);
    spawner.spawn(usb::run(usb_device, hid, cdc)).expect("spawn usb");

    // same order as scan::SWITCHES
    let mut switches: [Input; scan::KEY_COUNT] = switch_pins!(p;
        PIN_15, PIN_14, PIN_13, PIN_12, PIN_11, PIN_10
    );
    for pin in &mut switches {
        pin.set_schmitt(true);
    }

    let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let leds = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_17, &program);

    let mut keyboard = keyboard::Keyboard::new(board::Board::new(switches, leds));
    keyboard.start().await;
    loop {
        keyboard.update().await;
        Timer::after(config::SCAN_INTERVAL).await;
    }
}
