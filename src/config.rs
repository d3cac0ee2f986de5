use crate::memory::DEFAULT_PAGE_EXPONENT;

/// Default number of automatic deallocations a single outer `release` may chain.
pub const DEFAULT_CASCADE_LIMIT: usize = 10_000;

/// Configuration of a `RefMem`.
///
/// ```rust
/// use orx_refmem::*;
///
/// let config = RefMemConfig::default().with_cascade_limit(0).with_page_exponent(4);
/// let mem = RefMem::<i32>::with_config(config);
///
/// assert_eq!(mem.cascade_limit(), 0);
/// assert_eq!(mem.page_size(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefMemConfig {
    /// Maximum number of automatic deallocations chained by one outer `release`;
    /// zero disables automatic reclamation.
    pub cascade_limit: usize,
    /// The object table grows and shrinks by pages of `2^page_exponent` slots;
    /// values above [`MAX_PAGE_EXPONENT`] are clamped.
    ///
    /// [`MAX_PAGE_EXPONENT`]: crate::MAX_PAGE_EXPONENT
    pub page_exponent: usize,
}

impl Default for RefMemConfig {
    fn default() -> Self {
        Self {
            cascade_limit: DEFAULT_CASCADE_LIMIT,
            page_exponent: DEFAULT_PAGE_EXPONENT,
        }
    }
}

impl RefMemConfig {
    /// Sets the cascade limit.
    pub fn with_cascade_limit(mut self, cascade_limit: usize) -> Self {
        self.cascade_limit = cascade_limit;
        self
    }

    /// Sets the page exponent of the object table, clamped to [`MAX_PAGE_EXPONENT`].
    ///
    /// [`MAX_PAGE_EXPONENT`]: crate::MAX_PAGE_EXPONENT
    pub fn with_page_exponent(mut self, page_exponent: usize) -> Self {
        self.page_exponent = page_exponent.min(crate::MAX_PAGE_EXPONENT);
        self
    }
}
