use super::{Children, Handle};

/// A constant number of reference slots.
impl<const N: usize> Children for [Option<Handle>; N] {
    #[inline(always)]
    fn child(&self, index: usize) -> Option<Handle> {
        self.get(index).copied().flatten()
    }
}
