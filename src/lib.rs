// SPDX-License-Identifier: MPL-2.0
//! `mute_dock` is the reactive mute dock control of a media player's view
//! layer.
//!
//! It renders a clickable indicator reflecting the player's current mute
//! state, forwards user activation into a playback-control callback, and
//! keeps its markup synchronized with the player's central state model. The
//! crate is headless: it owns the retained element tree, gesture
//! normalization, the pub-sub model boundary, and the control itself, but
//! draws no pixels.

#![doc(html_root_url = "https://docs.rs/mute_dock/0.1.0")]

pub mod config;
pub mod dom;
pub mod error;
pub mod gesture;
pub mod i18n;
pub mod model;
pub mod template;
pub mod ui;
