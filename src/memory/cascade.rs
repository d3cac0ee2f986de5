/// Budget of automatic deallocations that a single outer `release` may chain.
///
/// * `limit == 0` disables automatic reclamation altogether.
/// * The spent budget is settled back to zero by every `retain` and at the start of every outer
///   operation; nested releases, triggered by teardowns, keep spending the same budget.
#[derive(Clone, Debug)]
pub(crate) struct CascadeLimiter {
    limit: usize,
    count: usize,
    depth: usize,
}

impl CascadeLimiter {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            count: 0,
            depth: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Number of automatic deallocations spent since the budget was last settled.
    #[inline(always)]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Settles the spent budget; called on every retain.
    #[inline(always)]
    pub(crate) fn settle(&mut self) {
        self.count = 0;
    }

    /// Marks the beginning of a release or deallocation; the outermost one settles the budget.
    ///
    /// Returns true if this is the outermost operation.
    pub(crate) fn enter(&mut self) -> bool {
        let outer = self.depth == 0;
        if outer {
            self.count = 0;
        }
        self.depth += 1;
        outer
    }

    pub(crate) fn exit(&mut self) {
        debug_assert!(self.depth > 0);
        self.depth -= 1;
    }

    /// Spends one unit of the budget if any is left; returns whether the object may be
    /// deallocated right away.
    pub(crate) fn try_claim(&mut self) -> bool {
        match self.limit > 0 && self.count < self.limit {
            true => {
                self.count += 1;
                true
            }
            false => false,
        }
    }
}
