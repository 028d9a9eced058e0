//! Fixed timestep simulation tick
//!
//! One tick is strictly: integrate, reflect off the world walls, collide.

use super::body::Body;
use super::broad_phase::{BroadPhase, PartitionParams, collide};

/// Advance every body by `vel * dt`
pub fn integrate(bodies: &mut [Body], dt: f32) {
    for body in bodies.iter_mut() {
        body.pos += body.vel * dt;
    }
}

/// Reflect bodies off the walls of a `width` x `height` world.
///
/// Per axis: a body whose edge crossed a wall is clamped so the edge sits on
/// the wall, and that velocity component is negated.
pub fn reflect(bodies: &mut [Body], width: f32, height: f32) {
    for body in bodies.iter_mut() {
        let r = body.radius();
        if body.pos.x - r < 0.0 {
            body.pos.x = r;
            body.vel.x = -body.vel.x;
        }
        if body.pos.x + r > width {
            body.pos.x = width - r;
            body.vel.x = -body.vel.x;
        }
        if body.pos.y - r < 0.0 {
            body.pos.y = r;
            body.vel.y = -body.vel.y;
        }
        if body.pos.y + r > height {
            body.pos.y = height - r;
            body.vel.y = -body.vel.y;
        }
    }
}

/// Advance the bodies by one fixed timestep.
///
/// Returns the number of pairs handed to the resolver.
pub fn tick(bodies: &mut [Body], broad_phase: BroadPhase, params: &PartitionParams, dt: f32) -> usize {
    integrate(bodies, dt);
    reflect(bodies, params.bounds.w, params.bounds.h);
    collide(bodies, broad_phase, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::body::Tint;
    use crate::sim::quadtree::Aabb;
    use glam::Vec2;

    fn disc(pos: Vec2, vel: Vec2) -> Body {
        Body::new(pos, vel, 10.0, 1.0, Tint::default())
    }

    fn params() -> PartitionParams {
        PartitionParams {
            bounds: Aabb::new(0.0, 0.0, 200.0, 100.0),
            capacity: 6,
            min_margin: 30.0,
        }
    }

    #[test]
    fn test_integrate() {
        let mut bodies = vec![disc(Vec2::new(50.0, 50.0), Vec2::new(120.0, -60.0))];
        integrate(&mut bodies, 0.5);
        assert_eq!(bodies[0].pos, Vec2::new(110.0, 20.0));
        assert_eq!(bodies[0].vel, Vec2::new(120.0, -60.0));
    }

    #[test]
    fn test_reflect_each_wall() {
        let mut bodies = vec![
            disc(Vec2::new(5.0, 50.0), Vec2::new(-10.0, 3.0)),
            disc(Vec2::new(195.0, 50.0), Vec2::new(10.0, 3.0)),
            disc(Vec2::new(50.0, -2.0), Vec2::new(1.0, -10.0)),
            disc(Vec2::new(50.0, 99.0), Vec2::new(1.0, 10.0)),
        ];
        reflect(&mut bodies, 200.0, 100.0);

        assert_eq!(bodies[0].pos, Vec2::new(10.0, 50.0));
        assert_eq!(bodies[0].vel, Vec2::new(10.0, 3.0));
        assert_eq!(bodies[1].pos, Vec2::new(190.0, 50.0));
        assert_eq!(bodies[1].vel, Vec2::new(-10.0, 3.0));
        assert_eq!(bodies[2].pos, Vec2::new(50.0, 10.0));
        assert_eq!(bodies[2].vel, Vec2::new(1.0, 10.0));
        assert_eq!(bodies[3].pos, Vec2::new(50.0, 90.0));
        assert_eq!(bodies[3].vel, Vec2::new(1.0, -10.0));
    }

    #[test]
    fn test_reflect_corner_flips_both_axes() {
        let mut bodies = vec![disc(Vec2::new(2.0, 3.0), Vec2::new(-5.0, -7.0))];
        reflect(&mut bodies, 200.0, 100.0);
        assert_eq!(bodies[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(bodies[0].vel, Vec2::new(5.0, 7.0));
    }

    #[test]
    fn test_reflect_leaves_interior_alone() {
        let mut bodies = vec![disc(Vec2::new(10.0, 90.0), Vec2::new(-5.0, 5.0))];
        reflect(&mut bodies, 200.0, 100.0);
        assert_eq!(bodies[0].pos, Vec2::new(10.0, 90.0));
        assert_eq!(bodies[0].vel, Vec2::new(-5.0, 5.0));
    }

    #[test]
    fn test_tick_order_integrate_reflect_collide() {
        // Approaching pair that overlaps only after integration
        let mut bodies = vec![
            disc(Vec2::new(80.0, 50.0), Vec2::new(120.0, 0.0)),
            disc(Vec2::new(101.0, 50.0), Vec2::new(-120.0, 0.0)),
        ];
        let resolved = tick(&mut bodies, BroadPhase::BruteForce, &params(), SIM_DT);
        assert_eq!(resolved, 1);
        assert!(bodies[0].vel.x < 0.0);
        assert!(bodies[1].vel.x > 0.0);
    }
}
