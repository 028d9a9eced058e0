//! Simulation settings
//!
//! World, stepper and initial population parameters. Loaded from JSON by the
//! driver; every field falls back to its default when missing.

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Aabb, BroadPhase, PartitionParams, Tint};

/// Initial population ranges, consumed by [`crate::setup`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of bodies
    pub count: usize,
    /// RNG seed for reproducible runs
    pub seed: u64,
    /// Distance from each wall that spawn positions keep clear of
    pub inset: f32,
    /// Each velocity component is drawn from [-max_speed, max_speed]
    pub max_speed: f32,
    /// Applied to drawn velocities
    pub speed_multiplier: f32,
    /// Inclusive radius range
    pub radius: [f32; 2],
    /// Inclusive mass range
    pub mass: [f32; 2],
    /// Tints picked uniformly per body
    pub palette: Vec<Tint>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            count: 40,
            seed: 0x5EED,
            inset: 50.0,
            max_speed: 120.0,
            speed_multiplier: 1.2,
            radius: [12.0, 12.0],
            mass: [1.0, 1.0],
            palette: vec![Tint::BLUE, Tint::ORANGE, Tint::YELLOW],
        }
    }
}

/// World and stepper configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Fixed tick length (seconds)
    pub dt: f32,
    /// Longest frame time fed into the accumulator (seconds)
    pub max_frame_time: f32,
    /// Quadtree node capacity
    pub quadtree_capacity: usize,
    /// Minimum query padding; raised to the largest body radius each tick
    pub min_query_margin: f32,
    /// Broad phase at startup
    pub broad_phase: BroadPhase,
    /// Start paused
    pub paused: bool,

    pub population: PopulationConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            dt: SIM_DT,
            max_frame_time: MAX_FRAME_TIME,
            quadtree_capacity: QUADTREE_CAPACITY,
            min_query_margin: QUERY_MARGIN,
            broad_phase: BroadPhase::BruteForce,
            paused: false,
            population: PopulationConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse from JSON and validate; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the ranges the stepper and population generator rely on
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.world_width > 0.0 && self.world_height > 0.0,
            "world size must be positive, got {}x{}",
            self.world_width,
            self.world_height
        );
        ensure!(self.dt > 0.0, "tick length must be positive, got {}", self.dt);
        ensure!(
            self.max_frame_time > 0.0,
            "max frame time must be positive, got {}",
            self.max_frame_time
        );
        let p = &self.population;
        ensure!(
            p.radius[0] > 0.0 && p.radius[0] <= p.radius[1],
            "radius range must be positive and ordered, got {:?}",
            p.radius
        );
        ensure!(
            p.mass[0] > 0.0 && p.mass[0] <= p.mass[1],
            "mass range must be positive and ordered, got {:?}",
            p.mass
        );
        Ok(())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Full world box, edges inclusive
    pub fn bounds(&self) -> Aabb {
        Aabb::new(0.0, 0.0, self.world_width, self.world_height)
    }

    pub fn partition_params(&self) -> PartitionParams {
        PartitionParams {
            bounds: self.bounds(),
            capacity: self.quadtree_capacity,
            min_margin: self.min_query_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.world_width, 1000.0);
        assert_eq!(config.world_height, 700.0);
        assert_eq!(config.quadtree_capacity, 6);
        assert_eq!(config.population.count, 40);
        assert_eq!(config.population.palette.len(), 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(
            r#"{ "world_width": 640, "broad_phase": "partitioned", "population": { "count": 5 } }"#,
        )
        .unwrap();
        assert_eq!(config.world_width, 640.0);
        assert_eq!(config.world_height, WORLD_HEIGHT);
        assert_eq!(config.broad_phase, BroadPhase::Partitioned);
        assert_eq!(config.population.count, 5);
        assert_eq!(config.population.max_speed, 120.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = SimConfig::default();
        config.paused = true;
        config.population.radius = [5.0, 20.0];
        let json = config.to_json_pretty().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_non_positive_tick_rejected() {
        assert!(SimConfig::from_json(r#"{ "dt": 0.0 }"#).is_err());
        assert!(SimConfig::from_json(r#"{ "dt": -0.01 }"#).is_err());
        assert!(SimConfig::from_json(r#"{ "dt": 0.01 }"#).is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(SimConfig::default().validate().is_ok());

        let bad = [
            SimConfig { world_width: 0.0, ..Default::default() },
            SimConfig { max_frame_time: 0.0, ..Default::default() },
            SimConfig {
                population: PopulationConfig { radius: [0.0, 5.0], ..Default::default() },
                ..Default::default()
            },
            SimConfig {
                population: PopulationConfig { mass: [2.0, 1.0], ..Default::default() },
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(SimConfig::from_json(r#"{ "broad_phase": "octree" }"#).is_err());
    }

    #[test]
    fn test_partition_params_follow_config() {
        let config = SimConfig {
            world_width: 200.0,
            world_height: 100.0,
            quadtree_capacity: 3,
            ..Default::default()
        };
        let params = config.partition_params();
        assert_eq!(params.bounds, Aabb::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(params.capacity, 3);
        assert_eq!(params.min_margin, QUERY_MARGIN);
    }
}
