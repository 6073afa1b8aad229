pub mod boundary;
pub mod browser;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod notes;
pub mod release_url;
pub mod ui;

pub use error::{NpError, Result};
