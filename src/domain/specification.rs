//! Composable query specifications
//!
//! A [`Specification`] is a small expression tree over customer fields.
//! It carries no evaluation logic of its own: the infrastructure layer folds
//! it into a database condition, so filtering always happens in SQL.

use super::customer::{CustomerField, FieldKind};
use super::DomainError;

/// Operand of a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i32),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Text(_) => FieldKind::Text,
        }
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    StartsWith,
    EndsWith,
    Contains,
}

impl Operator {
    /// Pattern operators only make sense on text columns.
    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            Operator::StartsWith | Operator::EndsWith | Operator::Contains
        )
    }
}

/// A single comparison `field <op> value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: CustomerField,
    pub operator: Operator,
    pub value: FieldValue,
    pub ignore_case: bool,
}

impl Predicate {
    pub fn new(field: CustomerField, operator: Operator, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
            ignore_case: false,
        }
    }

    /// Compare text case-insensitively.
    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Check that the operator and operand fit the field's storage kind.
    pub fn validate(&self) -> Result<(), DomainError> {
        let kind = self.field.kind();
        if self.value.kind() != kind {
            return Err(DomainError::Validation(format!(
                "value {:?} does not match the type of field '{}'",
                self.value,
                self.field.name()
            )));
        }
        if kind != FieldKind::Text && (self.operator.is_pattern() || self.ignore_case) {
            return Err(DomainError::Validation(format!(
                "{:?} is only supported on text fields, not '{}'",
                self.operator,
                self.field.name()
            )));
        }
        Ok(())
    }
}

/// Boolean filter over customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specification {
    Predicate(Predicate),
    And(Box<Specification>, Box<Specification>),
    Or(Box<Specification>, Box<Specification>),
    Not(Box<Specification>),
}

impl Specification {
    pub fn where_(field: CustomerField, operator: Operator, value: impl Into<FieldValue>) -> Self {
        Specification::Predicate(Predicate::new(field, operator, value))
    }

    pub fn and(self, other: Specification) -> Self {
        Specification::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Specification) -> Self {
        Specification::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Specification::Not(Box::new(self))
    }

    /// Validate every predicate in the tree.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Specification::Predicate(p) => p.validate(),
            Specification::And(l, r) | Specification::Or(l, r) => {
                l.validate()?;
                r.validate()
            }
            Specification::Not(inner) => inner.validate(),
        }
    }
}

impl From<Predicate> for Specification {
    fn from(p: Predicate) -> Self {
        Specification::Predicate(p)
    }
}
