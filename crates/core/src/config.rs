//! Engine configuration
//!
//! An immutable value handed to [`GameState::new`](crate::GameState::new).
//! Every field has a default, so a config file only needs the values it
//! changes. Rendering settings (colors, cell sizes) are not part of this.

use serde::{Deserialize, Serialize};

use crate::catalog::{standard_layouts, Catalog, RawLayout};
use crate::error::ConfigError;
use crate::repeat::RepeatIntervals;
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_GRAVITY_MS, DEFAULT_KEY_REPEAT_MS,
    DEFAULT_NEXT_QUEUE_LEN, DEFAULT_SOFT_DROP_MS, DEFAULT_TICK_RATE_HZ, MAX_NEXT_QUEUE_LEN,
};

/// Fastest tick rate that still leaves a whole millisecond per tick
pub const MAX_TICK_RATE_HZ: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub tick_rate_hz: u32,
    pub key_repeat_interval_ms: u32,
    pub gravity_interval_ms: u32,
    pub soft_drop_interval_ms: u32,
    /// Previewed pieces, 0..=6
    pub next_queue_len: usize,
    /// Bag seed; `None` seeds from system entropy
    pub seed: Option<u64>,
    /// Raw piece layouts, one entry per piece type
    pub pieces: Vec<RawLayout>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            key_repeat_interval_ms: DEFAULT_KEY_REPEAT_MS,
            gravity_interval_ms: DEFAULT_GRAVITY_MS,
            soft_drop_interval_ms: DEFAULT_SOFT_DROP_MS,
            next_queue_len: DEFAULT_NEXT_QUEUE_LEN,
            seed: None,
            pieces: standard_layouts(),
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every value and build the piece catalog
    ///
    /// The board has to fit the largest piece, otherwise the very first spawn
    /// could already be a loss.
    pub fn validate(&self) -> Result<Catalog, ConfigError> {
        let catalog = Catalog::from_layouts(&self.pieces)?;

        let min = catalog.max_size();
        if self.width < min || self.height < min {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min,
            });
        }
        if self.next_queue_len > MAX_NEXT_QUEUE_LEN {
            return Err(ConfigError::NextQueueLen {
                len: self.next_queue_len,
                max: MAX_NEXT_QUEUE_LEN,
            });
        }

        let intervals = [
            ("tick_rate_hz", self.tick_rate_hz),
            ("key_repeat_interval_ms", self.key_repeat_interval_ms),
            ("gravity_interval_ms", self.gravity_interval_ms),
            ("soft_drop_interval_ms", self.soft_drop_interval_ms),
        ];
        if let Some(&(name, _)) = intervals.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::ZeroInterval { name });
        }
        if self.tick_rate_hz > MAX_TICK_RATE_HZ {
            return Err(ConfigError::TickRateTooHigh {
                rate: self.tick_rate_hz,
                max: MAX_TICK_RATE_HZ,
            });
        }

        Ok(catalog)
    }

    pub fn repeat_intervals(&self) -> RepeatIntervals {
        RepeatIntervals {
            horizontal_ms: self.key_repeat_interval_ms,
            gravity_ms: self.gravity_interval_ms,
            soft_drop_ms: self.soft_drop_interval_ms,
        }
    }

    /// Milliseconds per engine tick
    pub fn tick_ms(&self) -> u32 {
        1000 / self.tick_rate_hz.max(1)
    }
}
