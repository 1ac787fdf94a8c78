pub mod cli;
pub mod config;
pub mod core;
pub mod dom;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod task;
pub mod terminal;
pub mod ui;

pub use config::{ConfigError, SiteConfig};
pub use core::ElementId;
