//! Bind ledger: the ordered values behind a fragment's placeholders

use crate::value::Value;

/// Ordered values for the placeholders of one SQL fragment.
///
/// Entry `i` belongs to the `i`-th `?` (left to right) of the fragment the
/// ledger is paired with. Values are stored as given: no reordering,
/// deduplication or coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindLedger {
    values: Vec<Value>,
}

impl BindLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Append `value` `count` times in a row, for patterns that reference
    /// one logical value through several `{val}` markers.
    pub fn append_repeated(&mut self, value: Value, count: usize) {
        self.values.extend(std::iter::repeat(value).take(count));
    }

    /// Append another ledger's entries after this one's.
    pub fn extend(&mut self, other: &BindLedger) {
        self.values.extend_from_slice(&other.values);
    }

    /// Current entries in bind order.
    pub fn snapshot(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
