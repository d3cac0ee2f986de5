/// Slot utilization of the underlying storage of the object table.
///
/// The result contains the following bits of information:
/// * `capacity`: number of slots that is already allocated, always a multiple of the page size.
/// * `num_live_objects`: number of slots holding a tracked object.
/// * `num_vacant_slots`: number of slots which had been used and vacated afterwards; however, not yet trimmed.
///
/// Note that `num_live_objects + num_vacant_slots` reflects the length of the underlying pinned vector,
/// which is less than or equal to the `capacity`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Utilization {
    /// Number of slots that is already allocated.
    pub capacity: usize,
    /// Number of slots holding a tracked object.
    pub num_live_objects: usize,
    /// Number of slots which had been used and vacated afterwards; however, not yet trimmed.
    pub num_vacant_slots: usize,
}
