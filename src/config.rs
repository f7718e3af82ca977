use std::fmt;
use std::time::Duration;

use crate::error::SnakeError;

/// Time between two simulation steps (10 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Side length of the square board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [GridSize::Small, GridSize::Medium, GridSize::Large];

    pub fn side(&self) -> u16 {
        match self {
            GridSize::Small => 16,
            GridSize::Medium => 32,
            GridSize::Large => 64,
        }
    }
}

impl TryFrom<u16> for GridSize {
    type Error = SnakeError;

    fn try_from(side: u16) -> Result<Self, Self::Error> {
        match side {
            16 => Ok(GridSize::Small),
            32 => Ok(GridSize::Medium),
            64 => Ok(GridSize::Large),
            other => Err(SnakeError::UnsupportedGridSize(other)),
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side();
        write!(f, "{}x{}", side, side)
    }
}

/// What happens when the head leaves the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Crossing an edge kills the snake
    #[default]
    Solid,
    /// Crossing an edge re-enters on the opposite side of the same row or column
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub grid_size: GridSize,
    pub boundary: Boundary,
    /// Seed for target placement, random when absent
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(grid_size: GridSize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, GridSize::Medium);
        assert_eq!(config.grid_size.side(), 32);
        assert_eq!(config.boundary, Boundary::Solid);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_grid_size_from_side() {
        for size in GridSize::ALL {
            assert_eq!(GridSize::try_from(size.side()).unwrap(), size);
        }
    }

    #[test]
    fn test_unsupported_grid_size() {
        let err = GridSize::try_from(20).unwrap_err();
        assert!(matches!(err, SnakeError::UnsupportedGridSize(20)));
    }

    #[test]
    fn test_grid_size_display() {
        assert_eq!(GridSize::Small.to_string(), "16x16");
        assert_eq!(GridSize::Large.to_string(), "64x64");
    }
}
