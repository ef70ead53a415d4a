pub mod client;
pub mod config;
pub mod models;
pub mod services;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use client::MemoryBackend;
pub use config::Config;
