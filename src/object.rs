use crate::teardown::TeardownKind;
use alloc::boxed::Box;
use core::fmt::Display;

/// Kind of a tracked memory block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// A single value.
    Scalar,
    /// A fixed length array of values.
    Array,
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Array => write!(f, "array"),
        }
    }
}

/// Header recorded next to the elements of an array block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayHeader {
    /// Number of elements of the array.
    pub elements: usize,
    /// Size of each element in bytes.
    pub element_size: usize,
}

/// Memory block owned by a tracked object.
#[derive(Debug)]
pub enum Block<T> {
    /// A single value.
    Scalar(T),
    /// An array of values together with its header.
    Array {
        /// Number and size of the elements.
        header: ArrayHeader,
        /// The elements.
        elements: Box<[T]>,
    },
}

impl<T> Block<T> {
    /// Kind of the block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Scalar(_) => BlockKind::Scalar,
            Self::Array { .. } => BlockKind::Array,
        }
    }

    /// Returns a reference to the value of a scalar block; None for arrays.
    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Self::Scalar(x) => Some(x),
            Self::Array { .. } => None,
        }
    }

    /// Returns a mutable reference to the value of a scalar block; None for arrays.
    pub fn as_scalar_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Scalar(x) => Some(x),
            Self::Array { .. } => None,
        }
    }

    /// Returns the elements of an array block; None for scalars.
    pub fn as_elements(&self) -> Option<&[T]> {
        match self {
            Self::Scalar(_) => None,
            Self::Array { elements, .. } => Some(elements),
        }
    }

    /// Returns the mutable elements of an array block; None for scalars.
    pub fn as_elements_mut(&mut self) -> Option<&mut [T]> {
        match self {
            Self::Scalar(_) => None,
            Self::Array { elements, .. } => Some(elements),
        }
    }

    /// Returns the header of an array block; None for scalars.
    pub fn header(&self) -> Option<ArrayHeader> {
        match self {
            Self::Scalar(_) => None,
            Self::Array { header, .. } => Some(*header),
        }
    }
}

/// A tracked object: the owned block together with its reference count and teardown metadata.
#[derive(Debug)]
pub struct Entry<T> {
    block: Block<T>,
    rc: usize,
    pointers: usize,
    teardown: TeardownKind,
}

impl<T> Entry<T> {
    pub(crate) fn new(block: Block<T>, pointers: usize, teardown: TeardownKind) -> Self {
        Self {
            block,
            rc: 0,
            pointers,
            teardown,
        }
    }

    /// Returns a reference to the owned block.
    pub fn block(&self) -> &Block<T> {
        &self.block
    }

    /// Returns a mutable reference to the owned block.
    pub fn block_mut(&mut self) -> &mut Block<T> {
        &mut self.block
    }

    /// Takes out the owned block, consuming the entry.
    pub fn into_block(self) -> Block<T> {
        self.block
    }

    /// Current reference count.
    #[inline(always)]
    pub fn rc(&self) -> usize {
        self.rc
    }

    /// Number of leading child reference slots owned by the value, or by each element of an array.
    #[inline(always)]
    pub fn pointers(&self) -> usize {
        self.pointers
    }

    /// Teardown to be run when the object is deallocated.
    #[inline(always)]
    pub fn teardown(&self) -> TeardownKind {
        self.teardown
    }

    /// Kind of the owned block.
    pub fn kind(&self) -> BlockKind {
        self.block.kind()
    }

    /// Returns true if the object is not owned by anyone.
    #[inline(always)]
    pub fn is_unowned(&self) -> bool {
        self.rc == 0
    }

    #[inline(always)]
    pub(crate) fn increment(&mut self) -> usize {
        self.rc += 1;
        self.rc
    }

    /// Decrements the count and returns the new count; None if the count is already zero.
    #[inline(always)]
    pub(crate) fn decrement(&mut self) -> Option<usize> {
        self.rc = self.rc.checked_sub(1)?;
        Some(self.rc)
    }
}
