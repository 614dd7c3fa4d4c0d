//! Depth (z-order) constants and the allocator that hands out fresh layers.
//!
//! Lower depth paints later and wins hit-testing. `DEPTH_TOP` is reserved for
//! selected entities and is never handed out by the allocator.

pub const DEPTH_TOP: i32 = -1;
pub const DEPTH_MAX: i32 = 99;

/// Lowest depth the allocator will ever return.
const DEPTH_FLOOR: i32 = DEPTH_TOP + 1;

pub fn clamp_depth(depth: i32) -> i32 {
    depth.clamp(DEPTH_TOP, DEPTH_MAX)
}

/// Monotonically decreasing depth counter.
///
/// Every new entity and every entity leaving the selected tier takes the
/// current value, so the most recent one stacks above everything unselected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerAllocator {
    initial: i32,
    next: i32,
}

impl Default for LayerAllocator {
    fn default() -> Self {
        Self::new(DEPTH_MAX)
    }
}

impl LayerAllocator {
    pub fn new(initial: i32) -> Self {
        let initial = clamp_depth(initial).max(DEPTH_FLOOR);
        Self {
            initial,
            next: initial,
        }
    }

    /// Value the next allocation will return.
    pub fn peek(&self) -> i32 {
        self.next
    }

    /// Returns the current counter value, then decrements it.
    ///
    /// Saturates at the floor instead of reaching `DEPTH_TOP`.
    pub fn next_depth(&mut self) -> i32 {
        let depth = self.next;
        if self.next > DEPTH_FLOOR {
            self.next -= 1;
        }
        depth
    }

    /// Depth for a newly created entity: strictly above every earlier
    /// allocation until the counter reaches `0`.
    ///
    /// Never returns `DEPTH_TOP`. Once [`is_exhausted`](Self::is_exhausted)
    /// reports true, further calls keep returning `0` and new entities tie
    /// with each other; callers that need distinct layers renumber their
    /// entities after a [`reset`](Self::reset) before allocating again.
    pub fn allocate_top(&mut self) -> i32 {
        self.next_depth()
    }

    /// Depth for an entity leaving `DEPTH_TOP` when it is deselected.
    ///
    /// Shares the counter with [`allocate_top`](Self::allocate_top), so a
    /// just-deselected entity stacks above everything created before it
    /// and below anything created after. The same floor applies.
    pub fn allocate_back(&mut self) -> i32 {
        self.next_depth()
    }

    /// True once the counter has reached its floor and can only repeat it.
    pub fn is_exhausted(&self) -> bool {
        self.next <= DEPTH_FLOOR
    }

    pub fn reset(&mut self) {
        self.next = self.initial;
    }
}
