//! Core primitives shared by the rastermat crates
//!
//! This crate provides the small, dependency free types the conversion
//! engine is built on
//!
//! It currently contains
//!
//! - Sample type and matrix element type enums together with the
//!   bit preserving mapping between the two
//! - Color classification and band order information
//! - Pixel windows and conversion options
//!
//! This library is `#[no_std]` unless the `std` feature is enabled.
//!
//! # Features
//!  - `std`: Enables `std` compilation support.
//!
//!  - `log`: Routes the logging macros to the `log` crate instead of
//!     the default no-op shims
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod color;
#[cfg(feature = "log")]
pub use log;
#[cfg(not(feature = "log"))]
pub mod log;
pub mod options;
pub mod region;
pub mod sample;
pub mod serde;
