use crate::{
    Entry, Handle, RefMemError, Utilization,
    memory::{Paging, Stamp},
};
use alloc::vec::Vec;
use orx_pinned_vec::PinnedVec;
use orx_split_vec::{Linear, SplitVec};

/// A position of the object table; vacant once its object is deallocated.
pub(crate) struct Slot<T> {
    stamp: Stamp,
    entry: Option<Entry<T>>,
}

impl<T> Slot<T> {
    #[inline(always)]
    fn entry_of(&self, handle: &Handle) -> Option<&Entry<T>> {
        match handle.is_in_state(self.stamp) {
            true => self.entry.as_ref(),
            false => None,
        }
    }

    #[inline(always)]
    fn entry_of_mut(&mut self, handle: &Handle) -> Option<&mut Entry<T>> {
        match handle.is_in_state(self.stamp) {
            true => self.entry.as_mut(),
            false => None,
        }
    }

    #[inline(always)]
    pub(crate) fn is_vacant(&self) -> bool {
        self.entry.is_none()
    }
}

/// Object table of the tracked allocations.
///
/// Objects live in slots of a pinned split vector growing linearly by one page at a time.
/// Objects never move; a deallocation vacates the slot which is reused by a later allocation.
/// Whenever the vacant tail of the storage exceeds one page, the storage is trimmed back to its
/// last occupied slot, which drops the unused trailing pages.
pub(crate) struct ObjectTable<T> {
    slots: SplitVec<Slot<T>, Linear>,
    vacant: Vec<usize>,
    len: usize,
    stamp: Stamp,
    paging: Paging,
    resizes: usize,
}

impl<T> ObjectTable<T> {
    pub(crate) fn new(paging: Paging) -> Self {
        Self {
            slots: SplitVec::with_linear_growth(paging.exponent()),
            vacant: Vec::new(),
            len: 0,
            stamp: Stamp::default(),
            paging,
            resizes: 0,
        }
    }

    // get

    /// Number of live objects.
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of used slots, live or vacant.
    #[inline(always)]
    pub(crate) fn num_slots(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub(crate) fn paging(&self) -> Paging {
        self.paging
    }

    pub(crate) fn resizes(&self) -> usize {
        self.resizes
    }

    pub(crate) fn utilization(&self) -> Utilization {
        Utilization {
            capacity: self.slots.capacity(),
            num_live_objects: self.len,
            num_vacant_slots: self.slots.len() - self.len,
        }
    }

    pub(crate) fn get(&self, handle: Handle) -> Result<&Entry<T>, RefMemError> {
        self.slots
            .get(handle.slot())
            .and_then(|slot| slot.entry_of(&handle))
            .ok_or(RefMemError::InvalidHandle(handle))
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> Result<&mut Entry<T>, RefMemError> {
        self.slots
            .get_mut(handle.slot())
            .and_then(|slot| slot.entry_of_mut(&handle))
            .ok_or(RefMemError::InvalidHandle(handle))
    }

    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_ok()
    }

    /// Returns the handle of the object at the given `position` if the slot is occupied.
    pub(crate) fn handle_at(&self, position: usize) -> Option<Handle> {
        self.slots
            .get(position)
            .filter(|slot| !slot.is_vacant())
            .map(|slot| Handle::new(position, slot.stamp))
    }

    /// Returns the handle of the object at the given `position` if it is occupied by an unowned object.
    pub(crate) fn unowned_at(&self, position: usize) -> Option<Handle> {
        self.slots.get(position).and_then(|slot| match &slot.entry {
            Some(entry) if entry.is_unowned() => Some(Handle::new(position, slot.stamp)),
            _ => None,
        })
    }

    /// Returns the handle of the live object in the lowest position.
    pub(crate) fn first_live(&self) -> Option<Handle> {
        (0..self.slots.len()).find_map(|position| self.handle_at(position))
    }

    // mut

    /// Registers the `entry` and returns its handle.
    pub(crate) fn insert(&mut self, entry: Entry<T>) -> Handle {
        self.stamp = self.stamp.successor_state();
        let stamp = self.stamp;
        let slot = Slot {
            stamp,
            entry: Some(entry),
        };

        let position = match self.vacant.pop() {
            Some(position) => {
                self.slots[position] = slot;
                position
            }
            None => {
                let capacity = self.slots.capacity();
                self.slots.push(slot);
                if self.slots.capacity() != capacity {
                    self.resizes += 1;
                    tracing::debug!(
                        capacity = self.slots.capacity(),
                        live = self.len + 1,
                        "object table grew by a page"
                    );
                }
                self.slots.len() - 1
            }
        };

        self.len += 1;
        Handle::new(position, stamp)
    }

    /// Detaches and returns the entry of the object with the given `handle`, vacating its slot.
    pub(crate) fn remove(&mut self, handle: Handle) -> Result<Entry<T>, RefMemError> {
        let entry = self
            .slots
            .get_mut(handle.slot())
            .filter(|slot| handle.is_in_state(slot.stamp))
            .and_then(|slot| slot.entry.take())
            .ok_or(RefMemError::InvalidHandle(handle))?;

        self.len -= 1;
        self.vacant.push(handle.slot());

        if self.is_in_vacant_tail(handle.slot()) {
            self.shrink_if_slack();
        }

        Ok(entry)
    }

    /// Returns true if every slot after the given `position` is vacant.
    ///
    /// The vacant tail never exceeds one page, which bounds the scan.
    fn is_in_vacant_tail(&self, position: usize) -> bool {
        (position + 1..self.slots.len()).all(|p| self.slots[p].is_vacant())
    }

    /// Trims the vacant tail of the storage when it leaves more than one page unused.
    fn shrink_if_slack(&mut self) {
        let mut end = self.slots.len();
        while end > 0 && self.slots[end - 1].is_vacant() {
            end -= 1;
        }

        let capacity = self.slots.capacity();
        if self.paging.exceeds_slack(capacity, end) {
            self.slots.truncate(end);
            self.vacant.retain(|&position| position < end);

            if self.slots.capacity() != capacity {
                self.resizes += 1;
                tracing::debug!(
                    capacity = self.slots.capacity(),
                    live = self.len,
                    "object table shrank"
                );
            }
        }
    }

    /// Drops every object without running any teardown.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
        self.len = 0;
    }
}
