use super::slice::{Slice, Sliceable};

/// Data store collaborator able to serve a slice of its entities.
///
/// Implementations receive descriptors that already passed [`Sliceable::validate`].
pub trait SliceableRepository<E> {
    fn find_all(&self, sliceable: &Sliceable) -> Result<Slice<E>, anyhow::Error>;
}
