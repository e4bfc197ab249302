//! Per-vertex forbidden-color bookkeeping for the coloring search.

use smallvec::SmallVec;

use crate::bitset::BitSet;
use crate::model::GraphModel;

/// Record of the restrictions one [`RestrictionTracker::apply`] added.
///
/// Must be handed back to [`RestrictionTracker::undo`] (or
/// [`RestrictionTracker::commit`]) in LIFO order relative to other pending applies.
#[must_use = "restrictions must be undone or committed"]
#[derive(Debug)]
pub struct Applied {
    color: usize,
    depth: usize,
    vertices: SmallVec<[usize; 16]>,
}

impl Applied {
    /// Color that was forbidden.
    pub fn color(&self) -> usize {
        self.color
    }

    /// Vertices that gained the restriction, ascending.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }
}

/// `forbidden[v]` holds the colors (`1..=n`) currently disallowed for `v`.
///
/// `saturation[v]` caches `forbidden[v].len()` so the branching heuristic reads it
/// in O(1).
#[derive(Clone, Debug)]
pub struct RestrictionTracker {
    forbidden: Vec<BitSet>,
    saturation: Vec<usize>,
    depth: usize,
}

impl RestrictionTracker {
    /// Tracker for `n` vertices with every restriction set empty.
    pub fn new(n: usize) -> Self {
        Self {
            forbidden: vec![BitSet::with_capacity(n + 1); n],
            saturation: vec![0; n],
            depth: 0,
        }
    }

    /// Returns whether `color` is forbidden for `v`.
    #[inline(always)]
    pub fn is_forbidden(&self, v: usize, color: usize) -> bool {
        self.forbidden[v].contains(color)
    }

    /// Number of distinct colors forbidden for `v`.
    #[inline(always)]
    pub fn saturation(&self, v: usize) -> usize {
        self.saturation[v]
    }

    /// Number of applies not yet undone or committed.
    #[inline]
    pub fn pending(&self) -> usize {
        self.depth
    }

    /// Forbids `color` for every uncolored injective neighbor of `v` that does not
    /// already forbid it.
    ///
    /// `coloring[u] == 0` marks `u` as uncolored. Neighbors that already forbid the
    /// color are skipped so the matching [`undo`](Self::undo) is exact.
    pub fn apply(
        &mut self,
        model: &GraphModel,
        coloring: &[usize],
        v: usize,
        color: usize,
    ) -> Applied {
        let mut vertices = SmallVec::new();
        for u in model.injective_neighbors(v) {
            if coloring[u] == 0 && self.forbidden[u].insert(color) {
                self.saturation[u] += 1;
                vertices.push(u);
            }
        }
        self.depth += 1;
        Applied {
            color,
            depth: self.depth,
            vertices,
        }
    }

    /// Reverts exactly the restrictions recorded in `applied`.
    pub fn undo(&mut self, applied: Applied) {
        debug_assert_eq!(applied.depth, self.depth, "restrictions undone out of order");
        for &u in &applied.vertices {
            let removed = self.forbidden[u].remove(applied.color);
            debug_assert!(removed);
            self.saturation[u] -= 1;
        }
        self.depth -= 1;
    }

    /// Keeps the restrictions in `applied` permanently.
    pub fn commit(&mut self, applied: Applied) {
        debug_assert_eq!(applied.depth, self.depth, "restrictions committed out of order");
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::AdjacencyMatrix;

    fn star3() -> GraphModel {
        GraphModel::new(AdjacencyMatrix::from_edges(4, [(0, 1), (0, 2), (0, 3)]).unwrap())
    }

    #[test]
    fn apply_then_undo_restores_state() {
        let model = star3();
        let mut tracker = RestrictionTracker::new(4);
        let mut coloring = vec![0; 4];

        coloring[1] = 1;
        let applied = tracker.apply(&model, &coloring, 1, 1);
        assert_eq!(applied.vertices(), &[2, 3]);
        assert!(tracker.is_forbidden(2, 1));
        assert!(tracker.is_forbidden(3, 1));
        assert!(!tracker.is_forbidden(0, 1));
        assert_eq!(tracker.saturation(2), 1);
        assert_eq!(tracker.pending(), 1);

        tracker.undo(applied);
        assert!((0..4).all(|v| !tracker.is_forbidden(v, 1)));
        assert!((0..4).all(|v| tracker.saturation(v) == 0));
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn already_forbidden_colors_are_not_recorded() {
        let model = star3();
        let mut tracker = RestrictionTracker::new(4);
        let mut coloring = vec![0; 4];

        coloring[1] = 2;
        let first = tracker.apply(&model, &coloring, 1, 2);
        coloring[2] = 2;
        let second = tracker.apply(&model, &coloring, 2, 2);
        // Vertex 1 and 2 are colored, 3 already forbids 2.
        assert!(second.vertices().is_empty());

        tracker.undo(second);
        assert!(tracker.is_forbidden(3, 2));
        tracker.undo(first);
        assert!(!tracker.is_forbidden(3, 2));
    }

    #[test]
    fn colored_neighbors_are_skipped() {
        let model = star3();
        let mut tracker = RestrictionTracker::new(4);
        let coloring = vec![0, 1, 1, 0];
        let applied = tracker.apply(&model, &coloring, 1, 3);
        assert_eq!(applied.vertices(), &[3]);
        assert_eq!(applied.color(), 3);
        tracker.commit(applied);
        assert!(tracker.is_forbidden(3, 3));
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn out_of_order_undo_panics() {
        let model = star3();
        let mut tracker = RestrictionTracker::new(4);
        let coloring = vec![0; 4];
        let a = tracker.apply(&model, &coloring, 1, 1);
        let _b = tracker.apply(&model, &coloring, 2, 2);
        tracker.undo(a);
    }
}
