#![allow(dead_code)]

pub mod config;
pub mod keys;
pub mod server;
pub mod transport;
