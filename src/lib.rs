pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;

pub use client::{Client, Timings};
pub use gateway::session::Identity;
pub use models::event::Event;
