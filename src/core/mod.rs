pub mod config;
pub mod error;

pub use config::{config, set_config, CombatConfig};
pub use error::{CombatError, Result};
