//! Broad phase: choose which body pairs reach the resolver
//!
//! Two strategies that detect the same overlapping pairs:
//! - brute force: every unordered pair `i < j`
//! - partitioned: a quadtree rebuilt every tick, queried with a padded
//!   square around each body
//!
//! Both apply the same axis-aligned pre-check before resolving. Pairs are
//! resolved as they are found, so later checks see earlier corrections.
//!
//! The partitioned tree is built once per tick, before any resolution. A
//! body pushed across a node edge by an earlier resolution in the same
//! tick can be missed as a candidate until the next tick's rebuild; this
//! only arises with three or more bodies in contact at once.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{bounds_overlap, resolve_pair};
use super::quadtree::{Aabb, Quadtree};

/// Broad-phase strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhase {
    /// All-pairs test
    #[default]
    BruteForce,
    /// Quadtree-filtered test
    Partitioned,
}

impl BroadPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadPhase::BruteForce => "brute_force",
            BroadPhase::Partitioned => "partitioned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "brute_force" | "brute" | "naive" => Some(BroadPhase::BruteForce),
            "partitioned" | "quadtree" => Some(BroadPhase::Partitioned),
            _ => None,
        }
    }

    /// The other strategy
    pub fn toggled(self) -> Self {
        match self {
            BroadPhase::BruteForce => BroadPhase::Partitioned,
            BroadPhase::Partitioned => BroadPhase::BruteForce,
        }
    }
}

/// Quadtree settings for the partitioned strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionParams {
    /// Root bounds; must cover every body center
    pub bounds: Aabb,
    /// References per node before subdividing
    pub capacity: usize,
    /// Lower bound on the padding added to a body's radius when querying
    pub min_margin: f32,
}

/// Query padding for this population.
///
/// A neighbor overlapping body `i` has its center within `r_i + r_j` on each
/// axis, so padding by the largest radius never misses one.
pub fn query_margin(bodies: &[Body], min_margin: f32) -> f32 {
    bodies
        .iter()
        .map(Body::radius)
        .fold(min_margin, f32::max)
}

/// Walk every candidate pair `(i, j)`, `i < j`, that passes the pre-check,
/// calling `on_pair` with the live body slice.
fn visit_pairs<F>(bodies: &mut [Body], mode: BroadPhase, params: &PartitionParams, mut on_pair: F)
where
    F: FnMut(&mut [Body], usize, usize),
{
    let n = bodies.len();
    match mode {
        BroadPhase::BruteForce => {
            for i in 0..n {
                for j in (i + 1)..n {
                    if bounds_overlap(&bodies[i], &bodies[j]) {
                        on_pair(bodies, i, j);
                    }
                }
            }
        }
        BroadPhase::Partitioned => {
            let tree = Quadtree::build(params.bounds, params.capacity, bodies);
            let margin = query_margin(bodies, params.min_margin);
            log::trace!(
                "Quadtree: {} refs, {} nodes, depth {}, margin {}",
                tree.len(),
                tree.node_count(),
                tree.depth(),
                margin
            );

            let mut candidates = Vec::new();
            for i in 0..n {
                candidates.clear();
                let region = Aabb::around(bodies[i].pos, bodies[i].radius() + margin);
                tree.query(&region, bodies, &mut candidates);

                for &j in &candidates {
                    // Self, and pairs already seen from the lower index
                    if j <= i {
                        continue;
                    }
                    if !bounds_overlap(&bodies[i], &bodies[j]) {
                        continue;
                    }
                    on_pair(bodies, i, j);
                }
            }
        }
    }
}

/// Run the broad phase and resolve every candidate pair in place.
///
/// Returns the number of pairs handed to the resolver.
pub fn collide(bodies: &mut [Body], mode: BroadPhase, params: &PartitionParams) -> usize {
    let mut resolved = 0;
    visit_pairs(bodies, mode, params, |bodies, i, j| {
        resolve_pair(bodies, i, j);
        resolved += 1;
    });
    resolved
}

/// Pairs the given strategy would hand to the resolver for these positions,
/// without resolving anything. Sorted.
pub fn candidate_pairs(
    bodies: &[Body],
    mode: BroadPhase,
    params: &PartitionParams,
) -> Vec<(usize, usize)> {
    let mut scratch = bodies.to_vec();
    let mut pairs = Vec::new();
    visit_pairs(&mut scratch, mode, params, |_, i, j| pairs.push((i, j)));
    pairs.sort_unstable();
    pairs
}
