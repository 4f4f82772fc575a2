pub mod config;
pub mod content;
pub mod db;
pub mod handlers;
pub mod logging;
pub mod progress;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
