// Library crate for integration tests.
// main.rs has its own mod declarations; this re-exports all modules.

pub mod assets;
pub mod badge;
pub mod config;
pub mod error;
pub mod jenkins;
pub mod routes;
pub mod server;
pub mod settings;
pub mod shields;
pub mod state;
