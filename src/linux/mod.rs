//! Linux module - hardware access through i2c-dev
//!
//! Only compiled on Linux with the "linux" feature enabled.

pub mod i2c;
