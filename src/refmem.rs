use crate::{
    ArrayHeader, Block, BlockKind, Children, DestructorId, Entry, Handle, RefMemConfig,
    RefMemError, ShutdownMode, ShutdownReport, Teardown, TeardownKind, Utilization,
    memory::{CascadeLimiter, Paging},
    table::ObjectTable,
    teardown::{Destructor, Destructors},
};
use alloc::{boxed::Box, vec::Vec};

/// `RefMem` is a manual memory manager where ownership of tracked objects is expressed
/// with explicit reference counting.
///
/// * Objects are allocated with a reference count of zero and are addressed by [`Handle`]s.
/// * [`retain`] increments and [`release`] decrements the count of an object.
/// * Once released to zero, an object is deallocated right away provided that the cascade budget
///   allows; otherwise it is deferred and stays tracked with a zero count until [`cleanup`] or
///   [`shutdown`].
/// * Deallocation runs the teardown of the object exactly once; the default teardown releases
///   the children declared by the [`Children`] implementation of the value, which may in turn
///   cascade into further deallocations.
///
/// Reference counting never reclaims cycles; objects in a cycle are only freed by [`deallocate`]
/// or [`shutdown`].
///
/// # Cascade budget
///
/// The cascade limit bounds the number of automatic deallocations chained by one outer [`release`].
/// The spent budget is settled back to zero at the start of every outer release and by every
/// [`retain`]. When the budget is exhausted, objects reaching zero are deferred.
/// A limit of zero disables automatic deallocation altogether.
///
/// # Examples
///
/// ```rust
/// use orx_refmem::*;
///
/// let mut mem = RefMem::<Option<Handle>>::new();
///
/// let child = mem.allocate(Teardown::Default, 0);
/// mem.retain(child).unwrap(); // owned by the caller
///
/// let parent = mem.allocate_with(Some(child), Teardown::Default, 1);
/// mem.retain(child).unwrap(); // owned by the parent
/// mem.retain(parent).unwrap();
/// assert_eq!(mem.count(), 2);
///
/// mem.release(parent).unwrap();
/// assert_eq!(mem.count(), 1);
/// assert_eq!(mem.rc(child), Ok(1));
///
/// mem.release(child).unwrap();
/// assert!(mem.is_empty());
/// ```
///
/// [`retain`]: RefMem::retain
/// [`release`]: RefMem::release
/// [`cleanup`]: RefMem::cleanup
/// [`shutdown`]: RefMem::shutdown
/// [`deallocate`]: RefMem::deallocate
pub struct RefMem<T> {
    pub(crate) table: ObjectTable<T>,
    pub(crate) cascade: CascadeLimiter,
    destructors: Destructors<T>,
    pending: Vec<Handle>,
    draining: bool,
}

impl<T> Default for RefMem<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RefMem<T> {
    /// Creates a new empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RefMemConfig::default())
    }

    /// Creates a new empty registry with the given `config`.
    pub fn with_config(config: RefMemConfig) -> Self {
        Self {
            table: ObjectTable::new(Paging::new(config.page_exponent)),
            cascade: CascadeLimiter::new(config.cascade_limit),
            destructors: Destructors::default(),
            pending: Vec::new(),
            draining: false,
        }
    }

    // get

    /// Number of tracked objects, including the deferred ones at a zero count.
    #[inline(always)]
    pub fn count(&self) -> usize {
        self.table.len()
    }

    /// Returns whether or not the registry tracks no object.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Current cascade limit.
    pub fn cascade_limit(&self) -> usize {
        self.cascade.limit()
    }

    /// Number of automatic deallocations spent since the cascade budget was last settled.
    pub fn cascade_count(&self) -> usize {
        self.cascade.count()
    }

    /// Number of slots in one page of the object table.
    pub fn page_size(&self) -> usize {
        self.table.paging().page_size()
    }

    /// Returns current slot utilization of the object table.
    pub fn utilization(&self) -> Utilization {
        self.table.utilization()
    }

    /// Number of times the object table grew or shrank so far.
    pub fn resizes(&self) -> usize {
        self.table.resizes()
    }

    /// Returns true if the `handle` refers to a live object of this registry.
    pub fn contains(&self, handle: Handle) -> bool {
        self.table.contains(handle)
    }

    /// Returns the reference count of the object.
    pub fn rc(&self, handle: Handle) -> Result<usize, RefMemError> {
        self.table.get(handle).map(Entry::rc)
    }

    /// Returns a reference to the tracked entry of the object.
    pub fn entry(&self, handle: Handle) -> Result<&Entry<T>, RefMemError> {
        self.table.get(handle)
    }

    /// Returns a reference to the value of a scalar object.
    pub fn get(&self, handle: Handle) -> Result<&T, RefMemError> {
        self.table
            .get(handle)?
            .block()
            .as_scalar()
            .ok_or(RefMemError::BlockKind {
                handle,
                expected: BlockKind::Scalar,
            })
    }

    /// Returns the elements of an array object.
    pub fn elements(&self, handle: Handle) -> Result<&[T], RefMemError> {
        self.table
            .get(handle)?
            .block()
            .as_elements()
            .ok_or(RefMemError::BlockKind {
                handle,
                expected: BlockKind::Array,
            })
    }

    /// Returns a reference to the element at the given `index` of an array object.
    pub fn element(&self, handle: Handle, index: usize) -> Result<&T, RefMemError> {
        let elements = self.elements(handle)?;
        let len = elements.len();
        elements.get(index).ok_or(RefMemError::IndexOutOfBounds {
            handle,
            index,
            len,
        })
    }

    /// Returns the header of an array object.
    pub fn header(&self, handle: Handle) -> Result<ArrayHeader, RefMemError> {
        self.table
            .get(handle)?
            .block()
            .header()
            .ok_or(RefMemError::BlockKind {
                handle,
                expected: BlockKind::Array,
            })
    }

    // mut

    /// Sets the cascade limit; zero disables automatic deallocation.
    pub fn set_cascade_limit(&mut self, limit: usize) {
        self.cascade.set_limit(limit);
    }

    /// Registers the custom `destructor` and returns its id, to be used as [`Teardown::Custom`].
    pub fn register_destructor(&mut self, destructor: Destructor<T>) -> DestructorId {
        self.destructors.register(destructor)
    }

    /// Returns a mutable reference to the value of a scalar object.
    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T, RefMemError> {
        self.table
            .get_mut(handle)?
            .block_mut()
            .as_scalar_mut()
            .ok_or(RefMemError::BlockKind {
                handle,
                expected: BlockKind::Scalar,
            })
    }

    /// Returns the mutable elements of an array object.
    pub fn elements_mut(&mut self, handle: Handle) -> Result<&mut [T], RefMemError> {
        self.table
            .get_mut(handle)?
            .block_mut()
            .as_elements_mut()
            .ok_or(RefMemError::BlockKind {
                handle,
                expected: BlockKind::Array,
            })
    }

    /// Returns a mutable reference to the element at the given `index` of an array object.
    pub fn element_mut(&mut self, handle: Handle, index: usize) -> Result<&mut T, RefMemError> {
        let elements = self.elements_mut(handle)?;
        let len = elements.len();
        elements.get_mut(index).ok_or(RefMemError::IndexOutOfBounds {
            handle,
            index,
            len,
        })
    }

    /// Allocates a scalar object holding the given `value` with a reference count of zero.
    ///
    /// `pointers` is the number of leading child slots of the value that the object owns;
    /// these are released by the default teardown.
    pub fn allocate_with(&mut self, value: T, teardown: Teardown, pointers: usize) -> Handle {
        let teardown = teardown.resolve(BlockKind::Scalar);
        let handle = self
            .table
            .insert(Entry::new(Block::Scalar(value), pointers, teardown));
        tracing::trace!(slot = handle.slot(), pointers, "allocate");
        handle
    }

    /// Allocates an array holding the given `values` with a reference count of zero.
    ///
    /// `pointers` is the number of leading child slots of each element that the array owns.
    pub fn allocate_array_with(&mut self, values: Box<[T]>, teardown: Teardown, pointers: usize) -> Handle {
        let elements = values.len();
        let block = Block::Array {
            header: ArrayHeader {
                elements,
                element_size: core::mem::size_of::<T>(),
            },
            elements: values,
        };
        let teardown = teardown.resolve(BlockKind::Array);
        let handle = self.table.insert(Entry::new(block, pointers, teardown));
        tracing::trace!(slot = handle.slot(), elements, pointers, "allocate array");
        handle
    }
}

impl<T: Default> RefMem<T> {
    /// Allocates a scalar object holding the default value with a reference count of zero.
    ///
    /// `pointers` is the number of leading child slots of the value that the object owns;
    /// [`Teardown::Default`] releases exactly these.
    pub fn allocate(&mut self, teardown: Teardown, pointers: usize) -> Handle {
        self.allocate_with(T::default(), teardown, pointers)
    }

    /// Allocates an array of `elements` default values with a reference count of zero.
    ///
    /// `pointers` is the number of leading child slots of each element that the array owns;
    /// [`Teardown::Default`] releases these for every element.
    pub fn allocate_array(&mut self, elements: usize, teardown: Teardown, pointers: usize) -> Handle {
        let values: Vec<T> = (0..elements).map(|_| T::default()).collect();
        self.allocate_array_with(values.into_boxed_slice(), teardown, pointers)
    }
}

impl<T: Children> RefMem<T> {
    /// Increments the reference count of the object and settles the cascade budget.
    ///
    /// Does nothing if `handle` is None.
    pub fn retain(&mut self, handle: impl Into<Option<Handle>>) -> Result<(), RefMemError> {
        let Some(handle) = handle.into() else {
            return Ok(());
        };
        let rc = self.table.get_mut(handle)?.increment();
        self.cascade.settle();
        tracing::trace!(slot = handle.slot(), rc, "retain");
        Ok(())
    }

    /// Decrements the reference count of the object.
    ///
    /// When the count reaches zero, the object is deallocated right away if the cascade budget
    /// allows; otherwise, it is deferred until [`cleanup`] or [`shutdown`].
    ///
    /// The object whose release starts a chain spends one unit of the budget itself, before the
    /// children released by its teardown. With the default limit of 10 000, releasing an array
    /// of 10 000 owned pointers therefore reclaims 9 999 elements and defers the last one.
    /// See [`RefMem`] for when the budget is settled.
    ///
    /// Cascaded deallocations are processed iteratively by the outermost call; the depth of a
    /// chain of owned objects does not grow the call stack.
    ///
    /// Does nothing if `handle` is None.
    ///
    /// [`cleanup`]: RefMem::cleanup
    /// [`shutdown`]: RefMem::shutdown
    pub fn release(&mut self, handle: impl Into<Option<Handle>>) -> Result<(), RefMemError> {
        let Some(handle) = handle.into() else {
            return Ok(());
        };
        let outer = self.cascade.enter();
        let result = self.release_tracked(handle);
        self.finish(outer, result)
    }

    fn release_tracked(&mut self, handle: Handle) -> Result<(), RefMemError> {
        let draining = self.draining;
        let entry = match self.table.get_mut(handle) {
            Ok(entry) => entry,
            Err(_) if draining => {
                tracing::trace!(slot = handle.slot(), "release of a drained object ignored");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let rc = entry.decrement().ok_or(RefMemError::Underflow(handle))?;
        tracing::trace!(slot = handle.slot(), rc, "release");

        match rc {
            0 if self.cascade.try_claim() => self.pending.push(handle),
            0 => tracing::debug!(
                slot = handle.slot(),
                cascade_limit = self.cascade.limit(),
                "cascade budget exhausted; deallocation deferred"
            ),
            _ => {}
        }
        Ok(())
    }

    /// Deallocates the object regardless of its reference count.
    ///
    /// The entry is detached from the table first and its teardown runs exactly once afterwards.
    pub fn deallocate(&mut self, handle: Handle) -> Result<(), RefMemError> {
        let outer = self.cascade.enter();
        let result = self.deallocate_tracked(handle);
        self.finish(outer, result)
    }

    fn deallocate_tracked(&mut self, handle: Handle) -> Result<(), RefMemError> {
        let mut entry = self.table.remove(handle)?;
        tracing::trace!(slot = handle.slot(), rc = entry.rc(), "deallocate");
        self.run_teardown(&mut entry)
    }

    /// Completes a release or deallocation; the outermost one drains the pending deallocations.
    fn finish(&mut self, outer: bool, result: Result<(), RefMemError>) -> Result<(), RefMemError> {
        let result = match outer {
            true => {
                let result = result.and_then(|_| self.drain_pending());
                // objects left behind by a failed cascade stay deferred at a zero count
                self.pending.clear();
                result
            }
            false => result,
        };
        self.cascade.exit();
        result
    }

    fn drain_pending(&mut self) -> Result<(), RefMemError> {
        while let Some(handle) = self.pending.pop() {
            // retained again or deallocated explicitly by a teardown in the meantime
            let unowned = self.table.get(handle).is_ok_and(Entry::is_unowned);
            if unowned {
                self.deallocate_tracked(handle)?;
            }
        }
        Ok(())
    }

    fn run_teardown(&mut self, entry: &mut Entry<T>) -> Result<(), RefMemError> {
        let pointers = entry.pointers();
        match entry.teardown() {
            TeardownKind::Nothing => Ok(()),
            TeardownKind::ReleaseChildren | TeardownKind::ReleaseElements => match entry.block() {
                Block::Scalar(value) => self.release_children(value, pointers),
                Block::Array { elements, .. } => self.release_elements(elements, pointers),
            },
            TeardownKind::Custom(id) => {
                let destructor = self.destructors.get(id)?;
                destructor(self, entry)
            }
        }
    }

    /// Releases the children held in the first `pointers` reference slots of the `value`.
    ///
    /// This is the default teardown of scalar objects; custom destructors may delegate to it.
    pub fn release_children(&mut self, value: &T, pointers: usize) -> Result<(), RefMemError> {
        for index in 0..pointers {
            self.release(value.child(index))?;
        }
        Ok(())
    }

    /// Releases the children held in the first `pointers` reference slots of every element.
    ///
    /// This is the default teardown of array objects; custom destructors may delegate to it.
    pub fn release_elements(&mut self, elements: &[T], pointers: usize) -> Result<(), RefMemError> {
        for element in elements {
            self.release_children(element, pointers)?;
        }
        Ok(())
    }

    /// Deallocates, in a single pass over the object table, every object at a zero reference count.
    ///
    /// These are objects which were never retained, or whose deallocation was deferred due to the
    /// cascade limit. Each deallocation starts with a settled cascade budget.
    ///
    /// Returns the number of reclaimed objects, including the ones reclaimed by cascades.
    pub fn cleanup(&mut self) -> Result<usize, RefMemError> {
        let before = self.count();

        let mut position = 0;
        while position < self.table.num_slots() {
            if let Some(handle) = self.table.unowned_at(position) {
                self.deallocate(handle)?;
            }
            position += 1;
        }

        let reclaimed = before.saturating_sub(self.count());
        tracing::debug!(reclaimed, remaining = self.count(), "cleanup");
        Ok(reclaimed)
    }

    /// Forcibly drains every tracked object regardless of its reference count and retires the registry.
    ///
    /// * [`ShutdownMode::Forced`] frees every object without running any teardown.
    /// * [`ShutdownMode::Ordered`] runs every teardown; unowned objects are drained first.
    ///
    /// Returns an error only if a custom destructor fails during an ordered shutdown;
    /// the remaining objects are freed without teardown in that case.
    pub fn shutdown(mut self, mode: ShutdownMode) -> Result<ShutdownReport, RefMemError> {
        let reclaimed = self.count();

        if mode == ShutdownMode::Ordered {
            self.draining = true;
            self.cascade.set_limit(usize::MAX);
            loop {
                self.cleanup()?;
                match self.table.first_live() {
                    Some(handle) => self.deallocate(handle)?,
                    None => break,
                }
            }
        }
        self.table.clear();
        self.pending.clear();

        let report = ShutdownReport {
            mode,
            reclaimed,
            resizes: self.table.resizes(),
        };
        tracing::info!(%mode, reclaimed, resizes = report.resizes, "shutdown");
        Ok(report)
    }
}
