pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod printing;
pub mod session;
