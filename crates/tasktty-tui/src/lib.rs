pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod input;
pub mod logging;
