use serde::{Deserialize, Serialize};

/// Errors from validating a grid configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cell_size must be positive, got {0}")]
    NonPositiveCellSize(f32),
    #[error("render_distance must be non-negative, got {0}")]
    NegativeRenderDistance(i32),
    #[error("max_resident {cap} is below the {needed}-cell render square")]
    CapBelowRenderSquare { cap: usize, needed: usize },
}

/// Streaming grid configuration, fixed at grid construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// World units per cell edge.
    pub cell_size: f32,
    /// Radius, in cells, within which terrain must be resident.
    pub render_distance: i32,
    /// Optional hard cap on the number of resident cells. `None` = uncapped.
    #[serde(default)]
    pub max_resident: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            render_distance: 2,
            max_resident: None,
        }
    }
}

impl GridConfig {
    /// Number of cells in the full render square around the player.
    pub fn render_square(&self) -> usize {
        let side = (2 * self.render_distance + 1).max(0) as usize;
        side * side
    }

    /// Check that the configuration can satisfy the residency invariant.
    ///
    /// A cap smaller than the render square would leave in-range cells
    /// permanently unloadable, so it is rejected here rather than silently
    /// starving the load pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size.is_nan() || self.cell_size <= 0.0 {
            return Err(ConfigError::NonPositiveCellSize(self.cell_size));
        }
        if self.render_distance < 0 {
            return Err(ConfigError::NegativeRenderDistance(self.render_distance));
        }
        if let Some(cap) = self.max_resident {
            let needed = self.render_square();
            if cap < needed {
                return Err(ConfigError::CapBelowRenderSquare { cap, needed });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let config = GridConfig {
            cell_size: 0.0,
            ..GridConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveCellSize(_))
        ));

        let config = GridConfig {
            cell_size: f32::NAN,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_render_distance() {
        let config = GridConfig {
            render_distance: -1,
            ..GridConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeRenderDistance(-1))
        ));
    }

    #[test]
    fn rejects_cap_below_render_square() {
        let config = GridConfig {
            render_distance: 1,
            max_resident: Some(8),
            ..GridConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapBelowRenderSquare { cap: 8, needed: 9 })
        ));

        let config = GridConfig {
            render_distance: 1,
            max_resident: Some(9),
            ..GridConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn render_square_counts_the_full_scan() {
        let config = GridConfig {
            render_distance: 2,
            ..GridConfig::default()
        };
        assert_eq!(config.render_square(), 25);
    }
}
