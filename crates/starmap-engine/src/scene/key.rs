use core::cmp::Ordering;

/// Stable sort key.
///
/// Ordering rules:
/// 1) `rank`: ascending (back-to-front)
/// 2) `order`: ascending (declaration order for equal ranks)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    /// Layer rank. Lower values are drawn first (further back).
    pub rank: i32,
    /// Position in the declaring sequence, so equal ranks keep their relative order.
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(rank: i32, order: u32) -> Self {
        Self { rank, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.rank.cmp(&other.rank) {
            Ordering::Equal => self.order.cmp(&other.order),
            o => o,
        }
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
