//! Token filter trait.

/// Stateless token filter: the same token is always detected the same way.
pub trait Filter<T>: Default {
    /// `true` when `item` should be filtered out.
    fn detect(&self, item: T) -> bool;
}
