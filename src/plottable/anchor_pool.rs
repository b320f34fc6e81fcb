use slotmap::SlotMap;
use tracing::warn;

use crate::math::Point2;

use super::Side;

slotmap::new_key_type! {
    /// Unique identifier for a fill anchor in an anchor pool.
    pub struct AnchorId;
}

/// Fixed-size arena of reusable fill anchors owned by one circle.
///
/// Every anchor is in exactly one of the front fill, the back fill or spare
/// storage, so `front + back + spare` always equals the pool size. Anchors
/// are created once and only their positions change afterwards.
#[derive(Debug, Clone, Default)]
pub struct AnchorPool {
    anchors: SlotMap<AnchorId, Point2>,
    front: Vec<AnchorId>,
    back: Vec<AnchorId>,
    spare: Vec<AnchorId>,
}

impl AnchorPool {
    /// Creates a pool of `size` anchors, all in spare storage.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let mut anchors = SlotMap::with_capacity_and_key(size);
        let spare = (0..size).map(|_| anchors.insert(Point2::origin())).collect();
        Self {
            anchors,
            front: Vec::with_capacity(size),
            back: Vec::with_capacity(size),
            spare,
        }
    }

    /// Total number of anchors owned by the pool.
    #[must_use]
    pub fn size(&self) -> usize {
        self.anchors.len()
    }

    /// Number of anchors in spare storage.
    #[must_use]
    pub fn spare_len(&self) -> usize {
        self.spare.len()
    }

    /// Anchors of one fill, in drawing order.
    #[must_use]
    pub fn ids(&self, side: Side) -> &[AnchorId] {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    /// Position of an anchor.
    #[must_use]
    pub fn point(&self, id: AnchorId) -> Option<&Point2> {
        self.anchors.get(id)
    }

    /// Positions of one fill, in drawing order.
    #[must_use]
    pub fn points(&self, side: Side) -> Vec<Point2> {
        self.ids(side)
            .iter()
            .filter_map(|&id| self.anchors.get(id).copied())
            .collect()
    }

    /// Returns every anchor of both fills to spare storage.
    pub fn reclaim(&mut self) {
        self.spare.append(&mut self.front);
        self.spare.append(&mut self.back);
    }

    /// Moves a spare anchor to `point` and appends it to the fill of `side`.
    ///
    /// Returns `false`, leaving the fill unchanged, when spare storage is
    /// empty.
    pub fn acquire(&mut self, side: Side, point: Point2) -> bool {
        let Some(id) = self.spare.pop() else {
            warn!(?side, size = self.size(), "anchor pool exhausted; fill truncated");
            return false;
        };
        if let Some(anchor) = self.anchors.get_mut(id) {
            *anchor = point;
        }
        match side {
            Side::Front => self.front.push(id),
            Side::Back => self.back.push(id),
        }
        true
    }

    /// Appends every point of `points` to the fill of `side`, stopping at the
    /// first one that cannot be placed.
    ///
    /// Returns the number of anchors placed.
    pub fn extend<I>(&mut self, side: Side, points: I) -> usize
    where
        I: IntoIterator<Item = Point2>,
    {
        let mut placed = 0;
        for point in points {
            if !self.acquire(side, point) {
                break;
            }
            placed += 1;
        }
        placed
    }
}
