//! calctl_client - command-line client for a remote calendar API.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod output;

pub use client::CalendarClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
