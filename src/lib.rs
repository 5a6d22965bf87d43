//! botctl - command-line client for the bot management platform

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod telemetry;
