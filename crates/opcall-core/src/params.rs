use crate::errors::{DispatchError, Result};
use crate::operand::Operand;

/// Ordered store of accumulated operands
///
/// Insertion order is preserved; the sequence only grows through
/// [`append`](Self::append) and only shrinks through [`clear`](Self::clear).
/// Not thread-safe - owned by exactly one dispatcher.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    operands: Vec<Operand>,
    capacity: Option<usize>,
}

impl ParameterStore {
    /// Create a new empty, unbounded store
    pub fn new() -> Self {
        Self {
            operands: Vec::new(),
            capacity: None,
        }
    }

    /// Create a store that holds at most `capacity` operands
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            operands: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Append an operand to the end of the sequence
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if the store is already at its cap; the
    /// sequence is left unchanged.
    pub fn append(&mut self, value: Operand) -> Result<()> {
        if let Some(capacity) = self.capacity {
            if self.operands.len() >= capacity {
                return Err(DispatchError::CapacityExceeded { capacity });
            }
        }

        self.operands.push(value);
        tracing::debug!(operand = %value, len = self.operands.len(), "operand appended");
        Ok(())
    }

    /// Current contents in insertion order
    ///
    /// The returned slice is a shared borrow, so a command receiving it
    /// cannot alter the store.
    pub fn snapshot(&self) -> &[Operand] {
        &self.operands
    }

    /// Remove all operands
    pub fn clear(&mut self) {
        self.operands.clear();
    }

    pub fn len(&self) -> usize {
        self.operands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// Configured cap, if any
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut store = ParameterStore::new();
        store.append(Operand::from(3)).unwrap();
        store.append(Operand::from(1)).unwrap();
        store.append(Operand::from(3)).unwrap();

        assert_eq!(
            store.snapshot(),
            &[Operand::from(3), Operand::from(1), Operand::from(3)]
        );
    }

    #[test]
    fn test_capacity_exceeded_leaves_store_unchanged() {
        let mut store = ParameterStore::with_capacity(2);
        store.append(Operand::from(1)).unwrap();
        store.append(Operand::from(2)).unwrap();

        let err = store.append(Operand::from(3)).unwrap_err();
        assert_eq!(err, DispatchError::CapacityExceeded { capacity: 2 });
        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot(), &[Operand::from(1), Operand::from(2)]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = ParameterStore::new();
        store.append(Operand::from(7)).unwrap();

        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_default_is_unbounded() {
        let store = ParameterStore::default();
        assert_eq!(store.capacity(), None);
    }
}
