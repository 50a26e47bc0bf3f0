pub mod commands;
pub mod config;
pub mod github;
pub mod http;
pub mod output;
pub mod runtime;
