//! WHERE / HAVING clause accumulation
//!
//! A [`Clause`] owns its SQL text and the ledger for the placeholders in
//! that text. Conditions are appended through [`Clause::chain`], which
//! updates both together or not at all, so the text always holds exactly as
//! many `?` as the ledger holds values.

use tracing::warn;

use crate::error::{Error, Result};
use crate::ledger::BindLedger;
use crate::pattern::Pattern;
use crate::value::Value;

/// Which boolean clause is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Where,
    Having,
}

impl ClauseKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClauseKind::Where => "WHERE",
            ClauseKind::Having => "HAVING",
        }
    }
}

/// How a condition joins the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// First condition of the clause
    Initial,
    And,
    Or,
}

impl Connector {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Connector::Initial => None,
            Connector::And => Some("AND"),
            Connector::Or => Some("OR"),
        }
    }
}

/// Progress of a clause.
///
/// `Empty` accepts only an initial condition; `Initialized` and `Chained`
/// accept only AND/OR conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClauseState {
    #[default]
    Empty,
    Initialized,
    Chained,
}

/// A WHERE or HAVING expression with its own bind ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    kind: ClauseKind,
    state: ClauseState,
    text: String,
    ledger: BindLedger,
}

impl Clause {
    pub fn new(kind: ClauseKind) -> Self {
        Self {
            kind,
            state: ClauseState::Empty,
            text: String::new(),
            ledger: BindLedger::new(),
        }
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn state(&self) -> ClauseState {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.state == ClauseState::Empty
    }

    /// Clause text including its keyword, or `""` when empty.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ledger(&self) -> &BindLedger {
        &self.ledger
    }

    /// Add a condition joined by `connector`.
    ///
    /// The pattern is expanded with `field` and `operator`; `value` is bound
    /// once per `{val}` it contains, wrapped as `%value%` when the operator
    /// is `LIKE`. On error the clause is left untouched.
    pub fn chain(
        &mut self,
        connector: Connector,
        field: &str,
        operator: &str,
        value: Value,
        pattern: &Pattern,
    ) -> Result<()> {
        let next = self.next_state(connector)?;

        let expansion = pattern.expand(field, operator);

        let mut text = String::with_capacity(self.text.len() + expansion.text.len() + 8);
        text.push_str(&self.text);
        match connector.keyword() {
            Some(word) => {
                text.push(' ');
                text.push_str(word);
            }
            None => text.push_str(self.kind.keyword()),
        }
        if !expansion.text.is_empty() {
            text.push(' ');
            text.push_str(&expansion.text);
        }

        if expansion.placeholders > 0 {
            let value = if is_like(operator) {
                value.to_like_pattern()
            } else {
                value
            };
            self.ledger.append_repeated(value, expansion.placeholders);
        }
        self.text = text;
        self.state = next;
        Ok(())
    }

    /// Add the first condition.
    pub fn add_condition(
        &mut self,
        field: &str,
        operator: &str,
        value: Value,
        pattern: &Pattern,
    ) -> Result<()> {
        self.chain(Connector::Initial, field, operator, value, pattern)
    }

    fn next_state(&self, connector: Connector) -> Result<ClauseState> {
        match (self.state, connector) {
            (ClauseState::Empty, Connector::Initial) => Ok(ClauseState::Initialized),
            (ClauseState::Empty, _) => Err(self.order_error(connector, "no initial condition")),
            (_, Connector::Initial) => Err(self.order_error(
                connector,
                "clause already started, chain further conditions with AND/OR",
            )),
            (_, _) => Ok(ClauseState::Chained),
        }
    }

    fn order_error(&self, connector: Connector, reason: &'static str) -> Error {
        let call = match (self.kind, connector) {
            (ClauseKind::Where, Connector::Initial) => "where",
            (ClauseKind::Where, Connector::And) => "where_and",
            (ClauseKind::Where, Connector::Or) => "where_or",
            (ClauseKind::Having, Connector::Initial) => "having",
            (ClauseKind::Having, Connector::And) => "having_and",
            (ClauseKind::Having, Connector::Or) => "having_or",
        };
        warn!(call, clause = self.kind.keyword(), reason, "rejected clause call");
        Error::CallOrder {
            clause: self.kind.keyword(),
            call,
            reason,
        }
    }
}

fn is_like(operator: &str) -> bool {
    operator.trim().eq_ignore_ascii_case("LIKE")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_placeholders(text: &str) -> usize {
        text.matches('?').count()
    }

    #[test]
    fn test_first_condition_gets_keyword() {
        let mut clause = Clause::new(ClauseKind::Where);
        clause
            .add_condition("age", ">", Value::I32(18), &Pattern::condition())
            .unwrap();
        assert_eq!(clause.text(), "WHERE age > ?");
        assert_eq!(clause.state(), ClauseState::Initialized);
    }

    #[test]
    fn test_chaining_keeps_positions() {
        let mut clause = Clause::new(ClauseKind::Where);
        let p = Pattern::condition();
        clause.chain(Connector::Initial, "age", ">", Value::I32(18), &p).unwrap();
        clause.chain(Connector::And, "age", "<", Value::I32(65), &p).unwrap();
        clause.chain(Connector::Or, "vip", "=", Value::Bool(true), &p).unwrap();

        assert_eq!(clause.text(), "WHERE age > ? AND age < ? OR vip = ?");
        assert_eq!(
            clause.ledger().snapshot(),
            &[Value::I32(18), Value::I32(65), Value::Bool(true)]
        );
        assert_eq!(clause.state(), ClauseState::Chained);
    }

    #[test]
    fn test_like_wraps_once_per_logical_value() {
        let mut clause = Clause::new(ClauseKind::Where);
        let p = Pattern::parse("({cam} {rel} {val} OR nickname {rel} {val})");
        clause.add_condition("name", "LIKE", Value::from("bob"), &p).unwrap();

        assert_eq!(clause.text(), "WHERE (name LIKE ? OR nickname LIKE ?)");
        assert_eq!(
            clause.ledger().snapshot(),
            &[Value::from("%bob%"), Value::from("%bob%")]
        );
    }

    #[test]
    fn test_not_like_is_not_wrapped() {
        let mut clause = Clause::new(ClauseKind::Where);
        clause
            .add_condition("name", "NOT LIKE", Value::from("a%"), &Pattern::condition())
            .unwrap();
        assert_eq!(clause.ledger().snapshot(), &[Value::from("a%")]);
    }

    #[test]
    fn test_repeated_placeholder() {
        let mut clause = Clause::new(ClauseKind::Having);
        let p = Pattern::parse("{val} BETWEEN low AND high OR {cam} = {val}");
        clause.add_condition("total", "", Value::I64(10), &p).unwrap();

        assert_eq!(clause.text(), "HAVING ? BETWEEN low AND high OR total = ?");
        assert_eq!(clause.ledger().len(), 2);
        assert_eq!(
            clause.ledger().snapshot(),
            &[Value::I64(10), Value::I64(10)]
        );
    }

    #[test]
    fn test_pattern_without_value_binds_nothing() {
        let mut clause = Clause::new(ClauseKind::Where);
        let p = Pattern::parse("{cam} IS NULL");
        clause.add_condition("deleted_at", "", Value::Null, &p).unwrap();
        clause
            .chain(Connector::And, "id", "=", Value::I32(1), &Pattern::condition())
            .unwrap();

        assert_eq!(clause.text(), "WHERE deleted_at IS NULL AND id = ?");
        assert_eq!(clause.ledger().snapshot(), &[Value::I32(1)]);
    }

    #[test]
    fn test_and_before_initial_is_rejected() {
        let mut clause = Clause::new(ClauseKind::Where);
        let err = clause
            .chain(Connector::And, "age", ">", Value::I32(1), &Pattern::condition())
            .unwrap_err();

        assert!(matches!(
            err,
            Error::CallOrder {
                clause: "WHERE",
                call: "where_and",
                ..
            }
        ));
        assert!(clause.is_empty());
        assert_eq!(clause.text(), "");
        assert!(clause.ledger().is_empty());
    }

    #[test]
    fn test_second_initial_is_rejected_without_mutation() {
        let mut clause = Clause::new(ClauseKind::Having);
        let p = Pattern::condition();
        clause.add_condition("n", ">", Value::I32(1), &p).unwrap();
        let before = clause.clone();

        let err = clause.add_condition("n", "<", Value::I32(9), &p).unwrap_err();
        assert!(matches!(err, Error::CallOrder { call: "having", .. }));
        assert_eq!(clause, before);
    }

    #[test]
    fn test_parity_holds_after_every_mutation() {
        let mut clause = Clause::new(ClauseKind::Where);
        let patterns = [
            "{cam} {rel} {val}",
            "{cam} BETWEEN {val} AND {val}",
            "{cam} IS NOT NULL",
            "{cam} IN ({val}, {val}, {val})",
        ];
        for (i, template) in patterns.iter().enumerate() {
            let connector = if i == 0 { Connector::Initial } else { Connector::Or };
            clause
                .chain(connector, "c", "=", Value::I32(i as i32), &Pattern::parse(template))
                .unwrap();
            assert_eq!(count_placeholders(clause.text()), clause.ledger().len());
        }
        assert_eq!(
            clause.ledger().snapshot(),
            &[
                Value::I32(0),
                Value::I32(1),
                Value::I32(1),
                Value::I32(3),
                Value::I32(3),
                Value::I32(3),
            ]
        );
    }
}
