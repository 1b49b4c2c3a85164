// SPDX-License-Identifier: MPL-2.0
//! View-layer controls for the player dock.

pub mod mute;

pub use mute::{HidePolicy, MuteControl};
