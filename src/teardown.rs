use crate::{BlockKind, Entry, RefMem, RefMemError};
use alloc::vec::Vec;
use core::fmt::Display;

/// Teardown requested when allocating an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Teardown {
    /// Releases nothing; the object does not own its children.
    Nothing,
    /// Releases the first `pointers` children of the value, or of every element of an array.
    #[default]
    Default,
    /// Runs the registered destructor with the given id.
    Custom(DestructorId),
}

impl Teardown {
    pub(crate) fn resolve(self, kind: BlockKind) -> TeardownKind {
        match (self, kind) {
            (Self::Nothing, _) => TeardownKind::Nothing,
            (Self::Default, BlockKind::Scalar) => TeardownKind::ReleaseChildren,
            (Self::Default, BlockKind::Array) => TeardownKind::ReleaseElements,
            (Self::Custom(id), _) => TeardownKind::Custom(id),
        }
    }
}

/// Teardown of a tracked object, resolved at allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownKind {
    /// No teardown.
    Nothing,
    /// Releases the first `pointers` children of a scalar value.
    ReleaseChildren,
    /// Releases the first `pointers` children of each element of an array.
    ReleaseElements,
    /// A registered destructor.
    Custom(DestructorId),
}

/// Id of a destructor registered to a `RefMem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DestructorId(pub(crate) usize);

impl Display for DestructorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// A custom destructor.
///
/// It receives the registry and the dying entry, which is already detached from the object table.
/// The destructor is responsible for releasing the children the object owns, typically by
/// delegating to [`RefMem::release_children`] or [`RefMem::release_elements`] for a part of the value.
pub type Destructor<T> = fn(&mut RefMem<T>, &mut Entry<T>) -> Result<(), RefMemError>;

/// Append-only table of custom destructors.
///
/// Objects sharing a destructor store only its small [`DestructorId`].
pub(crate) struct Destructors<T> {
    functions: Vec<Destructor<T>>,
}

impl<T> Default for Destructors<T> {
    fn default() -> Self {
        Self {
            functions: Vec::new(),
        }
    }
}

impl<T> Destructors<T> {
    pub(crate) fn register(&mut self, destructor: Destructor<T>) -> DestructorId {
        self.functions.push(destructor);
        DestructorId(self.functions.len() - 1)
    }

    pub(crate) fn get(&self, id: DestructorId) -> Result<Destructor<T>, RefMemError> {
        self.functions
            .get(id.0)
            .copied()
            .ok_or(RefMemError::UnknownDestructor(id))
    }
}
