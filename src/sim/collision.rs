//! Collision detection and response between discs
//!
//! Narrow phase: exact circle-circle overlap test, then an impulse-based
//! response that splits the overlap between both bodies and exchanges
//! momentum along the contact normal.

use glam::Vec2;

use super::body::Body;
use crate::consts::{COINCIDENT_OFFSET, POSITION_CORRECTION, RESTITUTION};

/// Result of a disc-disc overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from `b` toward `a`
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

/// Cheap axis-aligned rejection used before the exact test.
///
/// Returns false when the discs are certainly apart along one axis.
#[inline]
pub fn bounds_overlap(a: &Body, b: &Body) -> bool {
    let reach = a.radius() + b.radius();
    let d = (a.pos - b.pos).abs();
    !(d.x > reach || d.y > reach)
}

/// Exact overlap test between two discs
///
/// Coincident centers use a fixed small offset as the separation so the
/// normal stays finite.
pub fn disc_contact(a: &Body, b: &Body) -> Option<Contact> {
    let mut n = a.pos - b.pos;
    let mut dist = n.length();
    if dist == 0.0 {
        n = COINCIDENT_OFFSET;
        dist = n.length();
    }

    let penetration = a.radius() + b.radius() - dist;
    if penetration <= 0.0 {
        return None;
    }

    Some(Contact {
        normal: n / dist,
        penetration,
    })
}

/// Resolve a collision between two bodies in place.
///
/// Does nothing when the discs do not overlap. Otherwise pushes both apart
/// along the normal (each by the other's share of the total mass) and, if
/// they are approaching, applies an elastic impulse.
pub fn resolve(a: &mut Body, b: &mut Body) {
    let Some(contact) = disc_contact(a, b) else {
        return;
    };
    let normal = contact.normal;

    // Position correction
    let total_mass = a.mass() + b.mass();
    a.pos += normal * (contact.penetration * (b.mass() / total_mass) * POSITION_CORRECTION);
    b.pos -= normal * (contact.penetration * (a.mass() / total_mass) * POSITION_CORRECTION);

    let rv = a.vel - b.vel;
    let vel_along_normal = rv.dot(normal);
    if vel_along_normal > 0.0 {
        // Already separating
        return;
    }

    let j = -(1.0 + RESTITUTION) * vel_along_normal / (a.inv_mass() + b.inv_mass());
    let impulse = normal * j;
    a.vel += impulse * a.inv_mass();
    b.vel -= impulse * b.inv_mass();
}

/// Resolve the pair `(i, j)` of a body slice, `i != j`
pub fn resolve_pair(bodies: &mut [Body], i: usize, j: usize) {
    debug_assert_ne!(i, j);
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let (head, tail) = bodies.split_at_mut(hi);
    let (first, second) = (&mut head[lo], &mut tail[0]);
    if i < j {
        resolve(first, second);
    } else {
        resolve(second, first);
    }
}
