//! Domain clients: one method per backend operation.

pub mod bots;
pub mod integrations;

pub use bots::{Bot, BotClient, BotUser};
pub use integrations::{Integration, IntegrationClient, RemoteFunction};
