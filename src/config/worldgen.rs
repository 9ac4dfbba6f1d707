use serde::{Deserialize, Serialize};

const MIN_DIMENSION: u32 = 1;
const MAX_DIMENSION: u32 = 256;

/// Terrain bounds and seed. Out-of-range dimensions are clamped rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub seed: u64,
    pub width: u32,
    pub depth: u32,
    pub height: u32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 16,
            depth: 16,
            height: 16,
        }
    }
}

impl WorldGenConfig {
    pub fn clamped(mut self) -> Self {
        self.width = self.width.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self.depth = self.depth.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self.height = self.height.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_raises_degenerate_dimensions() {
        let config = WorldGenConfig {
            seed: 9,
            width: 0,
            depth: 1000,
            height: 16,
        }
        .clamped();

        assert_eq!(config.width, 1);
        assert_eq!(config.depth, 256);
        assert_eq!(config.height, 16);
        assert_eq!(config.seed, 9);
    }
}
