//! Cyclic paging state machine.
//!
//! The carousel renders a padded "physical" row of slides so that a drag
//! past either end lands on a duplicate of the opposite end, and the
//! viewport can then be snapped back without the user noticing. This
//! module keeps the logical index (into the real item collection) and
//! translates to and from physical positions.
//!
//! With two or more items the physical row is
//! `[last] + items + [first]`: one sentinel duplicate on each side, so
//! `physical_len == item_count + 2`. With fewer than two items there is
//! nothing to loop over and the row is the collection itself.

/// Whether the pager pads the physical row with sentinel slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerMode {
    /// Fewer than two items: no padding, no wraparound, no auto-advance.
    Normal,
    /// Two or more items: sentinel padding and infinite looping.
    Cycle,
}

impl PagerMode {
    pub fn for_item_count(count: usize) -> Self {
        if count < 2 {
            PagerMode::Normal
        } else {
            PagerMode::Cycle
        }
    }
}

/// The physical slide row derived from an item collection, expressed as an
/// index mapping rather than cloned items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSequence {
    item_count: usize,
    mode: PagerMode,
}

impl PhysicalSequence {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            mode: PagerMode::for_item_count(item_count),
        }
    }

    pub fn mode(&self) -> PagerMode {
        self.mode
    }

    /// Number of physical slides to lay out.
    pub fn len(&self) -> usize {
        match self.mode {
            PagerMode::Normal => self.item_count,
            PagerMode::Cycle => self.item_count + 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical item index displayed at `physical`.
    ///
    /// Position 0 shows the last item and the final position shows the
    /// first item in Cycle mode; everything in between is shifted by one.
    pub fn logical_for(&self, physical: usize) -> usize {
        debug_assert!(physical < self.len());
        match self.mode {
            PagerMode::Normal => physical,
            PagerMode::Cycle => {
                if physical == 0 {
                    self.item_count - 1
                } else if physical == self.item_count + 1 {
                    0
                } else {
                    physical - 1
                }
            }
        }
    }

    /// Physical position of a logical index (the non-sentinel occurrence).
    pub fn physical_for(&self, logical: usize) -> usize {
        match self.mode {
            PagerMode::Normal => logical,
            PagerMode::Cycle => logical + 1,
        }
    }

    /// Logical indices in physical order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).map(move |physical| self.logical_for(physical))
    }
}

/// An index change produced by [`PagerState::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// New logical index.
    pub logical: usize,
    /// Physical position the viewport should move to.
    pub physical: usize,
    /// Whether the move should animate. Wrapping back to the first item
    /// snaps instead, hiding the sentinel jump.
    pub animated: bool,
}

/// The outcome of reconciling a physical resting position, produced by
/// [`PagerState::settle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settle {
    /// Logical index after wraparound correction.
    pub logical: usize,
    /// Physical position the viewport should rest at.
    pub physical: usize,
    /// True when the rest position was a sentinel and the viewport must be
    /// snapped (not animated) to the equivalent real slide.
    pub repositioned: bool,
}

/// Tracks the current logical index and performs all wraparound
/// arithmetic. Every operation is inert on an empty collection; no index
/// math runs when there is nothing to index.
#[derive(Clone, Copy, Debug, Default)]
pub struct PagerState {
    item_count: usize,
    current: usize,
}

impl PagerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection size and resets the current index to 0.
    /// Called on every collection reload.
    pub fn reset(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.current = 0;
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn mode(&self) -> PagerMode {
        PagerMode::for_item_count(self.item_count)
    }

    pub fn sequence(&self) -> PhysicalSequence {
        PhysicalSequence::new(self.item_count)
    }

    /// Current logical index, or `None` when the collection is empty.
    pub fn current(&self) -> Option<usize> {
        (self.item_count > 0).then_some(self.current)
    }

    /// Physical position of the current slide.
    pub fn physical_index(&self) -> usize {
        self.sequence().physical_for(self.current)
    }

    /// Steps to the next logical index, wrapping at the end.
    ///
    /// Returns `None` below two items: with one item `(i + 1) mod 1` would
    /// land on the same slide, and with zero there is no modulus to take.
    pub fn advance(&mut self) -> Option<Transition> {
        if self.item_count < 2 {
            return None;
        }
        self.current = (self.current + 1) % self.item_count;
        let animated = self.current != 0;
        if !animated {
            log::debug!("pager wrapped back to 0, snapping past sentinel");
        }
        Some(Transition {
            logical: self.current,
            physical: self.physical_index(),
            animated,
        })
    }

    /// Reconciles the logical index after the viewport came to rest at
    /// `physical`, applying wraparound correction when the rest position
    /// is a sentinel slide.
    ///
    /// Returns `None` when the collection is empty.
    pub fn settle(&mut self, physical: isize) -> Option<Settle> {
        if self.item_count == 0 {
            return None;
        }
        let count = self.item_count as isize;
        let logical = match self.mode() {
            PagerMode::Normal => physical,
            PagerMode::Cycle => physical - 1,
        };
        let (logical, repositioned) = if logical == count {
            // Came to rest on the high sentinel (duplicate of the first
            // item); continue from the real first slide.
            log::debug!("settled on high sentinel, wrapping to 0");
            (0, true)
        } else if logical == -1 {
            // Low sentinel, duplicate of the last item.
            log::debug!("settled on low sentinel, wrapping to {}", count - 1);
            (count - 1, true)
        } else {
            (logical.clamp(0, count - 1), false)
        };
        self.current = logical as usize;
        Some(Settle {
            logical: self.current,
            physical: self.physical_index(),
            repositioned,
        })
    }
}
