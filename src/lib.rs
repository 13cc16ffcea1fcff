pub mod api;
pub mod browser;
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod filters;
pub mod logging;
pub mod output;
pub mod ranking;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
