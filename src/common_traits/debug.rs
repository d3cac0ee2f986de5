use crate::RefMem;
use core::fmt::Debug;

impl<T> Debug for RefMem<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RefMem")
            .field("count", &self.count())
            .field("cascade_limit", &self.cascade_limit())
            .field("cascade_count", &self.cascade_count())
            .field("utilization", &self.utilization())
            .finish()
    }
}
