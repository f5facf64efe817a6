//! `config.toml` sections. [`settings::Config`] is the root.

pub mod alert;
pub mod logging;
pub mod poll;
pub mod settings;
