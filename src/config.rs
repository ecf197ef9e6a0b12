//! Compile-time settings. There is no runtime configuration; handedness is picked with the
//! `left-handed` cargo feature.

use embassy_time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whether the switches are laid out for the right hand (bit 1 on the control key).
pub const RIGHT_HANDED: bool = !cfg!(feature = "left-handed");

/// Consecutive disagreeing samples needed before a switch is considered to have changed.
pub const DEBOUNCE_COUNT: u8 = 5;

/// Delay between scans of the switches in the firmware main loop.
pub const SCAN_INTERVAL: Duration = Duration::from_millis(1);

/// Delay between steps of a scrolling message.
pub const SCROLL_DELAY: Duration = Duration::from_millis(250);

/// Pause after the help and game banners, before waiting for the keys to be released.
pub const BANNER_PAUSE: Duration = Duration::from_secs(2);

/// Pause between characters of an animated type-out in the help tour.
pub const TYPE_OUT_DELAY: Duration = Duration::from_millis(100);

/// How long a game round runs before the chord for the expected character is revealed.
pub const GAME_GUIDE_DELAY: Duration = Duration::from_secs(1);

/// How long the final score stays up after a game is lost.
pub const GAME_OVER_PAUSE: Duration = Duration::from_secs(5);

/// Points for a correct character typed before the guide appeared.
pub const GAME_SCORE_UNASSISTED: u32 = 5;
/// Points for a correct character typed after the guide appeared.
pub const GAME_SCORE_ASSISTED: u32 = 1;

/// How many characters the display shows at once.
pub const DISPLAY_WIDTH: usize = 4;

/// USB vendor and product IDs, from the range set aside for hobby keyboards.
pub const USB_VID: u16 = 0xfeed;
pub const USB_PID: u16 = 0x6368;
pub const USB_MANUFACTURER: &str = "PICO Chord";
pub const USB_PRODUCT: &str = "Six Key Chord Keyboard";
