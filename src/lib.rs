pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod highscore;
pub mod input;
pub mod registry;
pub mod session;
pub mod timers;
