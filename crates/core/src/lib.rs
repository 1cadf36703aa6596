pub mod config;
pub mod error;
pub mod manifest;
pub mod selector;
pub mod types;

pub use config::{Config, parse_config, parse_config_str};
pub use error::{Error, Result};
pub use selector::{Selection, juz_for_date, parse_override, select};
pub use types::*;
