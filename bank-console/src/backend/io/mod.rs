//! # IO Module
//!
//! Interface layer between the user and the domain services. The only
//! interface is the interactive console in [`console`].

pub mod console;

pub use console::ShellContext;
