//! Body state and core simulation types
//!
//! A body is a rigid disc with constant radius and mass. Only position and
//! velocity change during a run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque visual tag carried by a body (RGB).
///
/// The simulation never reads it; it exists for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tint(pub u8, pub u8, pub u8);

impl Tint {
    pub const BLUE: Tint = Tint(52, 152, 219);
    pub const ORANGE: Tint = Tint(243, 156, 18);
    pub const YELLOW: Tint = Tint(241, 196, 15);

    /// Packed 0xRRGGBB
    pub fn to_u32(self) -> u32 {
        (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }
}

/// A simulated disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center, world coordinates
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    radius: f32,
    mass: f32,
    pub tint: Tint,
}

impl Body {
    /// Create a body.
    ///
    /// `radius` and `mass` must be positive. This is checked with a debug
    /// assertion only; release builds trust the caller.
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, mass: f32, tint: Tint) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive, got {radius}");
        debug_assert!(mass > 0.0, "body mass must be positive, got {mass}");
        Self {
            pos,
            vel,
            radius,
            mass,
            tint,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }
}
