// Library interface for repodash
// The `rdash` binary and any other presentation layer sit on top of `api`

pub mod actions;
pub mod api;
pub mod browse;
pub mod cli;
pub mod config;
pub mod detail;
pub mod errors;
pub mod launcher;
pub mod remote;
pub mod repo;
pub mod scanner;
pub mod state;
pub mod status;
pub mod suggestions;
pub mod vcs;
