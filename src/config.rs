//! Command-line options and the validated settings derived from them.

use std::num::NonZeroU32;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::game::{DEFAULT_FALL_INTERVAL, FALL_INTERVAL};

pub const DEFAULT_FRAME_RATE: f64 = 60.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("fall interval must be at least one frame")]
    ZeroFallInterval,
    #[error("frame rate must be a positive number, got {0}")]
    InvalidFrameRate(f64),
}

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockdrop",
    version,
    about = "Falling-block puzzle in the terminal. Fill rows to clear them; each row scores 10.",
    long_about = "Falling-block puzzle in the terminal.\n\n\
        CONTROLS:\n  Left/A  Move left   Right/D  Move right   Up/W  Rotate   Down/S  Soft drop\n  \
        P       Pause       R        Restart      Q / Esc  Quit"
)]
pub struct Args {
    /// Frames between gravity steps.
    #[arg(long, default_value_t = FALL_INTERVAL, value_name = "FRAMES")]
    pub fall_interval: u32,

    /// Simulation frames per second.
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE, value_name = "FPS")]
    pub frame_rate: f64,

    /// Seed for the piece generator. Random when not set.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

impl Args {
    pub fn into_config(self) -> Result<GameConfig, ConfigError> {
        let fall_interval =
            NonZeroU32::new(self.fall_interval).ok_or(ConfigError::ZeroFallInterval)?;

        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(self.frame_rate));
        }
        let frame_duration = Duration::try_from_secs_f64(1.0 / self.frame_rate)
            .map_err(|_| ConfigError::InvalidFrameRate(self.frame_rate))?;

        Ok(GameConfig {
            fall_interval,
            frame_duration,
            seed: self.seed,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub fall_interval: NonZeroU32,
    pub frame_duration: Duration,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fall_interval: DEFAULT_FALL_INTERVAL,
            frame_duration: Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE),
            seed: None,
        }
    }
}
