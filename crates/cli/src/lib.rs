//! Wareguard command-line interface

pub mod commands;
pub mod interactive;
