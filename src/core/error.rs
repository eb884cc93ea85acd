use thiserror::Error;

use crate::board::Coords;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Invalid board size: {width}x{height}")]
    InvalidBoardSize { width: i32, height: i32 },

    #[error("Hex not on board: {0:?}")]
    HexNotOnBoard(Coords),

    #[error("No building at {0:?}")]
    NoBuilding(Coords),

    #[error("Unknown terrain: {0}")]
    UnknownTerrain(String),

    #[error("Malformed terrain string: {0}")]
    MalformedTerrain(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Slot {slot} out of range for {location}")]
    SlotOutOfRange { location: String, slot: usize },

    #[error("Slot {slot} of {location} is already occupied")]
    SlotOccupied { location: String, slot: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
