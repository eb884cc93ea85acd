//! Hex Combat - hex-board targeting and critical-slot damage resolution

pub mod board;
pub mod core;
pub mod damage;
pub mod targeting;
