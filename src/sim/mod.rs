//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by body index)
//! - No rendering, input or platform dependencies

pub mod body;
pub mod broad_phase;
pub mod collision;
pub mod quadtree;
pub mod tick;
pub mod world;

pub use body::{Body, Tint};
pub use broad_phase::{BroadPhase, PartitionParams, candidate_pairs, collide, query_margin};
pub use collision::{Contact, bounds_overlap, disc_contact, resolve, resolve_pair};
pub use quadtree::{Aabb, Quadtree};
pub use tick::{integrate, reflect, tick};
pub use world::World;
