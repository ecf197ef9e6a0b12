//! This "library" build is here as a hack for loading unit tests to run on local arch, without depending on any hardware-related stuff.
//! (This is necessary as main.rs is inherently hardware-related code.)
//! See the `run-tests` script in the project root for more information.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

#[allow(dead_code, unused_imports)]
mod chord;
#[allow(dead_code, unused_imports)]
mod color;
#[allow(dead_code, unused_imports)]
mod config;
#[allow(dead_code, unused_imports)]
mod decode;
#[allow(dead_code, unused_imports)]
mod game;
#[allow(dead_code, unused_imports)]
mod help;
#[allow(dead_code, unused_imports)]
mod io;
#[allow(dead_code, unused_imports)]
mod keyboard;
#[allow(dead_code, unused_imports)]
mod keymap;
#[allow(dead_code, unused_imports)]
mod processor;
#[allow(dead_code, unused_imports)]
mod scan;
#[allow(dead_code, unused_imports)]
mod state;
#[cfg(test)]
mod testing;
