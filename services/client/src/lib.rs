//! services/client/src/lib.rs
//!
//! Adapters, configuration and the command-line front end for the
//! ProTechSuite project client.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod state;
