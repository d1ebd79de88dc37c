//! Radius queries over agent locations.
//!
//! The world builds one index per update pass from the locations at the
//! start of the pass and relocates an entry whenever an agent is moved
//! during the pass (a brake), so queries always see current positions.
//! Two implementations are provided:
//!
//! - [`LinearScan`]: O(N) per query; fine for a single intersection.
//! - [`RTreeIndex`]: `rstar` R-tree; O(log N + k) per query for large
//!   populations.
//!
//! Both return candidate addresses in ascending order so callers see the
//! same iteration order regardless of the backing structure.

use isim_core::AgentId;
use isim_geom::Coord;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

pub trait ProximityIndex {
    /// Addresses of all indexed agents within `radius` of `center`
    /// (inclusive), ascending.
    fn within(&self, center: Coord, radius: f64) -> Vec<AgentId>;

    /// Move agent `id` from `from` to `to`.  Unknown agents are ignored.
    fn relocate(&mut self, id: AgentId, from: Coord, to: Coord);
}

// ── LinearScan ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct LinearScan {
    points: Vec<(AgentId, Coord)>,
}

impl LinearScan {
    pub fn build(points: impl IntoIterator<Item = (AgentId, Coord)>) -> Self {
        let mut points: Vec<_> = points.into_iter().collect();
        points.sort_unstable_by_key(|&(id, _)| id);
        Self { points }
    }
}

impl ProximityIndex for LinearScan {
    fn within(&self, center: Coord, radius: f64) -> Vec<AgentId> {
        self.points
            .iter()
            .filter(|&&(_, p)| center.distance(p) <= radius)
            .map(|&(id, _)| id)
            .collect()
    }

    fn relocate(&mut self, id: AgentId, _from: Coord, to: Coord) {
        if let Ok(i) = self.points.binary_search_by_key(&id, |&(k, _)| k) {
            self.points[i].1 = to;
        }
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// R-tree entry: agent address + location.
#[derive(Clone, Debug, PartialEq)]
struct AgentPoint {
    id:    AgentId,
    point: [f64; 2],
}

impl RTreeObject for AgentPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

pub struct RTreeIndex {
    tree: RTree<AgentPoint>,
}

impl RTreeIndex {
    /// Bulk-load the tree (O(N log N)).
    pub fn build(points: impl IntoIterator<Item = (AgentId, Coord)>) -> Self {
        let entries = points
            .into_iter()
            .map(|(id, c)| AgentPoint { id, point: [c.x, c.y] })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl ProximityIndex for RTreeIndex {
    fn within(&self, center: Coord, radius: f64) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .tree
            .locate_within_distance([center.x, center.y], radius * radius)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn relocate(&mut self, id: AgentId, from: Coord, to: Coord) {
        let old = AgentPoint { id, point: [from.x, from.y] };
        if self.tree.remove(&old).is_some() {
            self.tree.insert(AgentPoint { id, point: [to.x, to.y] });
        }
    }
}

// ── Backend selection ─────────────────────────────────────────────────────────

/// Which index the world builds for each update pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProximityBackend {
    #[default]
    LinearScan,
    RTree,
}

impl ProximityBackend {
    pub fn build(
        self,
        points: impl IntoIterator<Item = (AgentId, Coord)>,
    ) -> Box<dyn ProximityIndex> {
        match self {
            ProximityBackend::LinearScan => Box::new(LinearScan::build(points)),
            ProximityBackend::RTree => Box::new(RTreeIndex::build(points)),
        }
    }
}
