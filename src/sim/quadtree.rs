//! Quadtree broad-phase index
//!
//! Indexes body *centers* (not disc extents) inside a fixed region. Nodes
//! live in a flat arena and refer to their children by index; bodies are
//! referred to by their index in the body slice the tree was built over.
//! A tree is only valid for the body slice and tick it was built for.
//!
//! Insertion fills a node up to `capacity`, then subdivides it once into
//! four equal quadrants and hands further bodies to the first quadrant
//! (NW, NE, SW, SE) that contains the center. Bodies already stored in a
//! node stay there after it subdivides.

use glam::Vec2;

use super::body::Body;
use crate::consts::QUADTREE_MAX_DEPTH;

/// Axis-aligned rectangle `[x, x + w] x [y, y + h]` (edges inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0);
        Self { x, y, w, h }
    }

    /// Square of half-width `half` centered on `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
    }

    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Touching edges count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.x > self.x + self.w
            || other.x + other.w < self.x
            || other.y > self.y + self.h
            || other.y + other.h < self.y)
    }

    /// Four equal quadrants in NW, NE, SW, SE order (y grows downward)
    pub fn quadrants(&self) -> [Aabb; 4] {
        let hw = self.w / 2.0;
        let hh = self.h / 2.0;
        [
            Aabb::new(self.x, self.y, hw, hh),
            Aabb::new(self.x + hw, self.y, hw, hh),
            Aabb::new(self.x, self.y + hh, hw, hh),
            Aabb::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }
}

#[derive(Debug, Clone)]
struct Node {
    bounds: Aabb,
    items: Vec<usize>,
    children: Option<[usize; 4]>,
    depth: u32,
}

impl Node {
    fn leaf(bounds: Aabb, depth: u32) -> Self {
        Self {
            bounds,
            items: Vec::new(),
            children: None,
            depth,
        }
    }
}

/// Point quadtree over body indices
#[derive(Debug, Clone)]
pub struct Quadtree {
    nodes: Vec<Node>,
    capacity: usize,
    max_depth: u32,
}

const ROOT: usize = 0;

impl Quadtree {
    pub fn new(bounds: Aabb, capacity: usize) -> Self {
        Self::with_max_depth(bounds, capacity, QUADTREE_MAX_DEPTH)
    }

    /// Tree whose nodes at `max_depth` keep accepting bodies instead of
    /// subdividing further
    pub fn with_max_depth(bounds: Aabb, capacity: usize, max_depth: u32) -> Self {
        Self {
            nodes: vec![Node::leaf(bounds, 0)],
            capacity: capacity.max(1),
            max_depth,
        }
    }

    /// Build a tree over every body in `bodies`
    pub fn build(bounds: Aabb, capacity: usize, bodies: &[Body]) -> Self {
        let mut tree = Self::new(bounds, capacity);
        for index in 0..bodies.len() {
            if !tree.insert(bodies, index) {
                log::warn!(
                    "Quadtree rejected body {} at {:?} (outside {:?})",
                    index,
                    bodies[index].pos,
                    bounds
                );
            }
        }
        tree
    }

    /// Insert body `index`, keyed by its current center.
    ///
    /// Returns false if the center lies outside the tree's bounds.
    pub fn insert(&mut self, bodies: &[Body], index: usize) -> bool {
        self.insert_at(ROOT, bodies[index].pos, index)
    }

    fn insert_at(&mut self, node: usize, pos: Vec2, index: usize) -> bool {
        if !self.nodes[node].bounds.contains_point(pos) {
            return false;
        }

        let n = &mut self.nodes[node];
        if n.items.len() < self.capacity || n.depth >= self.max_depth {
            n.items.push(index);
            return true;
        }

        let existing = n.children;
        let children = match existing {
            Some(children) => children,
            None => self.subdivide(node),
        };
        children
            .into_iter()
            .any(|child| self.insert_at(child, pos, index))
    }

    fn subdivide(&mut self, node: usize) -> [usize; 4] {
        let depth = self.nodes[node].depth + 1;
        let first = self.nodes.len();
        for bounds in self.nodes[node].bounds.quadrants() {
            self.nodes.push(Node::leaf(bounds, depth));
        }
        let children = [first, first + 1, first + 2, first + 3];
        self.nodes[node].children = Some(children);
        children
    }

    /// Append to `out` every stored index whose body's center lies in `region`.
    ///
    /// Centers are read from `bodies` at query time, but nodes are pruned by
    /// the bounds fixed at insertion. A body moved across a node edge after
    /// the build can be missed by a query whose region no longer reaches
    /// the node that stores it.
    pub fn query(&self, region: &Aabb, bodies: &[Body], out: &mut Vec<usize>) {
        let mut stack = vec![ROOT];
        while let Some(node) = stack.pop() {
            let n = &self.nodes[node];
            if !n.bounds.intersects(region) {
                continue;
            }
            out.extend(
                n.items
                    .iter()
                    .copied()
                    .filter(|&i| region.contains_point(bodies[i].pos)),
            );
            if let Some(children) = n.children {
                // Reversed so NW is visited first
                stack.extend(children.into_iter().rev());
            }
        }
    }

    /// Number of stored references
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|n| n.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest node level (root is 0)
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}
