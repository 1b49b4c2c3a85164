// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) for the dock controls.
//!
//! Tooltip strings are localized with the Fluent system. Translation files
//! are embedded at build time; locale resolution tries the CLI argument,
//! then the config file, then the OS locale, falling back to `en-US`.

pub mod fluent;

pub use fluent::I18n;
