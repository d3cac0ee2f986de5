/// Paging of the object table storage.
///
/// The table grows and shrinks by whole pages of `2^exponent` slots.
/// The default exponent is 10, which gives pages of 1024 slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Paging {
    exponent: usize,
}

/// Default page exponent of the object table; pages hold `2^10 = 1024` slots.
pub const DEFAULT_PAGE_EXPONENT: usize = 10;

/// Largest page exponent of the object table; greater exponents are clamped to it.
pub const MAX_PAGE_EXPONENT: usize = 24;

impl Paging {
    /// Creates the paging with the given `exponent`, clamped to [`MAX_PAGE_EXPONENT`].
    pub(crate) fn new(exponent: usize) -> Self {
        Self {
            exponent: exponent.min(MAX_PAGE_EXPONENT),
        }
    }

    #[inline(always)]
    pub(crate) fn exponent(&self) -> usize {
        self.exponent
    }

    /// Number of slots in one page.
    #[inline(always)]
    pub(crate) fn page_size(&self) -> usize {
        1 << self.exponent
    }

    /// Returns true if more than one page of the `capacity` is unused when only the first
    /// `used` slots are kept.
    pub(crate) fn exceeds_slack(&self, capacity: usize, used: usize) -> bool {
        capacity.saturating_sub(used) > self.page_size()
    }
}
