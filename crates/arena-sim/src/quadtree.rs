//! Region quadtree over enemy positions on the x/z plane.
//!
//! Nodes live in a flat arena and refer to their children by index. The
//! tree is rebuilt from scratch every frame; `clear` keeps the node arena
//! and bucket allocations so a rebuild does not allocate in steady state.
//!
//! Only leaves hold ids. A leaf holds up to `capacity` of them; the insertion
//! that would overflow it splits the leaf into four quadrants and moves every
//! stored id, and the new one, into the single quadrant containing its point.
//! Leaves at `max_depth` do not split and let their bucket grow instead.

use glam::Vec2;

use arena_core::types::EnemyId;

/// Axis-aligned rectangle on the ground plane, stored as center and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub center: Vec2,
    pub half: Vec2,
}

/// Child slot order inside a split node. North is -z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];
}

impl Boundary {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Closed containment test on both axes. NaN points are never contained.
    pub fn contains(&self, p: Vec2) -> bool {
        (p.x - self.center.x).abs() <= self.half.x && (p.y - self.center.y).abs() <= self.half.y
    }

    /// Whether any point of this rectangle lies within `radius` of `center`.
    pub fn intersects_disk(&self, center: Vec2, radius: f32) -> bool {
        let d = ((center - self.center).abs() - self.half).max(Vec2::ZERO);
        d.length_squared() <= radius * radius
    }

    /// The quadrant a point falls in. Points on a split line go east / south.
    pub fn quadrant_of(&self, p: Vec2) -> Quadrant {
        match (p.x < self.center.x, p.y < self.center.y) {
            (true, true) => Quadrant::NorthWest,
            (false, true) => Quadrant::NorthEast,
            (true, false) => Quadrant::SouthWest,
            (false, false) => Quadrant::SouthEast,
        }
    }

    /// Boundary of one quadrant.
    pub fn quadrant(&self, q: Quadrant) -> Boundary {
        let half = self.half * 0.5;
        let offset = match q {
            Quadrant::NorthWest => Vec2::new(-half.x, -half.y),
            Quadrant::NorthEast => Vec2::new(half.x, -half.y),
            Quadrant::SouthWest => Vec2::new(-half.x, half.y),
            Quadrant::SouthEast => Vec2::new(half.x, half.y),
        };
        Boundary::new(self.center + offset, half)
    }

    /// Smallest square (plus `margin`) enclosing every finite point.
    /// With no finite points the result is centered on the origin.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2>, margin: f32) -> Boundary {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for p in points.into_iter().filter(|p| p.is_finite()) {
            min = min.min(p);
            max = max.max(p);
        }
        if min.x > max.x {
            return Boundary::new(Vec2::ZERO, Vec2::splat(margin.max(1.0)));
        }
        let center = (min + max) * 0.5;
        let extent = (max - min).max_element() * 0.5 + margin;
        Boundary::new(center, Vec2::splat(extent))
    }
}

#[derive(Debug, Clone)]
struct Node {
    boundary: Boundary,
    depth: u32,
    /// Ids with the point they were inserted at. Empty once split.
    bucket: Vec<(EnemyId, Vec2)>,
    /// Arena index of the north-west child; the other three follow it.
    children: Option<usize>,
}

impl Node {
    fn reset(&mut self, boundary: Boundary, depth: u32) {
        self.boundary = boundary;
        self.depth = depth;
        self.bucket.clear();
        self.children = None;
    }
}

/// Arena-backed quadtree of enemy ids.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Node>,
    /// Nodes in use this frame. Entries past this are spare allocations.
    live: usize,
    capacity: usize,
    max_depth: u32,
    /// Ids whose point lay outside the root. Returned by every query.
    outside: Vec<EnemyId>,
    len: usize,
}

impl QuadTree {
    pub fn new(capacity: usize, max_depth: u32) -> Self {
        Self {
            nodes: Vec::new(),
            live: 0,
            capacity: capacity.max(1),
            max_depth,
            outside: Vec::new(),
            len: 0,
        }
    }

    /// Forget all ids and start over with a single root node.
    pub fn clear(&mut self, root: Boundary) {
        self.live = 0;
        self.len = 0;
        self.outside.clear();
        self.alloc(root, 0);
    }

    /// Clear and insert every `(id, point)` pair.
    pub fn rebuild(&mut self, root: Boundary, items: impl IntoIterator<Item = (EnemyId, Vec2)>) {
        self.clear(root);
        for (id, point) in items {
            self.insert(id, point);
        }
    }

    /// Record `id` at `point`. Returns false if the point is outside the
    /// root; the id is then kept aside and reported by every query.
    pub fn insert(&mut self, id: EnemyId, point: Vec2) -> bool {
        self.len += 1;
        if self.live == 0 || !self.nodes[0].boundary.contains(point) {
            self.outside.push(id);
            return false;
        }

        let mut index = 0;
        loop {
            let node = &self.nodes[index];
            if let Some(first) = node.children {
                index = first + node.boundary.quadrant_of(point) as usize;
                continue;
            }
            if node.bucket.len() < self.capacity || node.depth >= self.max_depth {
                self.nodes[index].bucket.push((id, point));
                return true;
            }
            self.subdivide(index);
        }
    }

    /// Append to `out` every id stored in a node whose boundary comes
    /// within `radius` of `center`, plus ids outside the root.
    ///
    /// The result is a superset of the ids whose point is within `radius`;
    /// callers do the exact distance test.
    pub fn query_disk(&self, center: Vec2, radius: f32, out: &mut Vec<EnemyId>) {
        out.extend_from_slice(&self.outside);
        if self.live > 0 {
            self.query_node(0, center, radius, out);
        }
    }

    fn query_node(&self, index: usize, center: Vec2, radius: f32, out: &mut Vec<EnemyId>) {
        let node = &self.nodes[index];
        if !node.boundary.intersects_disk(center, radius) {
            return;
        }
        out.extend(node.bucket.iter().map(|(id, _)| *id));
        if let Some(first) = node.children {
            for q in Quadrant::ALL {
                self.query_node(first + q as usize, center, radius, out);
            }
        }
    }

    fn subdivide(&mut self, index: usize) {
        let boundary = self.nodes[index].boundary;
        let depth = self.nodes[index].depth + 1;
        let first = self.alloc(boundary.quadrant(Quadrant::NorthWest), depth);
        for q in &Quadrant::ALL[1..] {
            self.alloc(boundary.quadrant(*q), depth);
        }
        self.nodes[index].children = Some(first);

        let mut stored = std::mem::take(&mut self.nodes[index].bucket);
        for (id, point) in stored.drain(..) {
            let child = first + boundary.quadrant_of(point) as usize;
            self.nodes[child].bucket.push((id, point));
        }
        self.nodes[index].bucket = stored;
    }

    fn alloc(&mut self, boundary: Boundary, depth: u32) -> usize {
        let index = self.live;
        if let Some(node) = self.nodes.get_mut(index) {
            node.reset(boundary, depth);
        } else {
            self.nodes.push(Node {
                boundary,
                depth,
                bucket: Vec::with_capacity(self.capacity),
                children: None,
            });
        }
        self.live += 1;
        index
    }

    /// Ids inserted since the last clear.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nodes in use this frame.
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Nodes ever allocated, including spares kept for reuse.
    pub fn allocated_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> Option<Boundary> {
        (self.live > 0).then(|| self.nodes[0].boundary)
    }

    /// Ids that fell outside the root on insertion.
    pub fn outside(&self) -> &[EnemyId] {
        &self.outside
    }

    /// How many buckets (including the outside list) hold `id`.
    pub fn bucket_occurrences(&self, id: EnemyId) -> usize {
        let in_nodes: usize = self.nodes[..self.live]
            .iter()
            .map(|n| n.bucket.iter().filter(|(b, _)| *b == id).count())
            .sum();
        in_nodes + self.outside.iter().filter(|&&b| b == id).count()
    }

    /// Boundary of the leaf whose bucket holds `id`, if any.
    pub fn boundary_of(&self, id: EnemyId) -> Option<Boundary> {
        self.nodes[..self.live]
            .iter()
            .find(|n| n.bucket.iter().any(|(b, _)| *b == id))
            .map(|n| n.boundary)
    }

    /// Whether `id` is stored in a node that has not been split.
    pub fn held_in_leaf(&self, id: EnemyId) -> bool {
        self.nodes[..self.live]
            .iter()
            .any(|n| n.children.is_none() && n.bucket.iter().any(|(b, _)| *b == id))
    }

    /// Deepest level currently in use.
    pub fn depth(&self) -> u32 {
        self.nodes[..self.live].iter().map(|n| n.depth).max().unwrap_or(0)
    }
}
