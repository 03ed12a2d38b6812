//! Comma-separated value fragments (INSERT values, UPDATE assignments)

use crate::ledger::BindLedger;
use crate::pattern::Expansion;
use crate::value::Value;

/// A comma-joined SQL list paired with the ledger for its placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueList {
    text: String,
    ledger: BindLedger,
}

impl ValueList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item, binding `value` once per placeholder in it.
    pub fn push(&mut self, item: Expansion, value: Value) {
        if !self.text.is_empty() {
            self.text.push_str(", ");
        }
        self.text.push_str(&item.text);
        self.ledger.append_repeated(value, item.placeholders);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ledger(&self) -> &BindLedger {
        &self.ledger
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
