//! Disc Sim - A fixed-timestep 2D disc collision simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, quadtree, stepper)
//! - `settings`: Data-driven world and population configuration
//! - `setup`: Seeded initial population generator
//!
//! Vector math is `glam::Vec2`: `+`, `-`, `* f32`, `/ f32`, `dot`, `length`
//! and `normalize_or_zero` (the zero vector normalizes to zero).

pub mod settings;
pub mod setup;
pub mod sim;

pub use glam::Vec2;
pub use settings::{PopulationConfig, SimConfig};
pub use sim::{Body, BroadPhase, Tint, World};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Longest real frame time fed into the accumulator (prevents spiral of death)
    pub const MAX_FRAME_TIME: f32 = 0.25;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1000.0;
    pub const WORLD_HEIGHT: f32 = 700.0;

    /// Quadtree references per node before subdividing
    pub const QUADTREE_CAPACITY: usize = 6;
    /// Depth at which a quadtree node stops subdividing and just stores
    pub const QUADTREE_MAX_DEPTH: u32 = 16;
    /// Minimum padding added to a body's radius for neighbor queries
    pub const QUERY_MARGIN: f32 = 30.0;

    /// Perfectly elastic contacts
    pub const RESTITUTION: f32 = 1.0;
    /// Fraction of the overlap removed per resolution
    pub const POSITION_CORRECTION: f32 = 0.5;
    /// Separation substituted when two centers coincide exactly
    pub const COINCIDENT_OFFSET: glam::Vec2 = glam::Vec2::new(0.01, 0.01);
}
