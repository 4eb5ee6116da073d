pub mod chdman;
pub mod command;
pub mod config;
pub mod error;
pub mod form;
pub mod inputs;
pub mod logging;
pub mod models;
pub mod schema;
pub mod templates;
pub mod values;

pub use crate::error::{Error, Result};
pub use crate::models::*;
