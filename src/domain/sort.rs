//! Caller-supplied result ordering

use super::DomainError;
use super::customer::CustomerField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Field(CustomerField),
    /// Raw SQL expression, e.g. `LENGTH(password)`
    Unsafe(String),
}

/// Ordered list of sort keys, applied left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    orders: Vec<(SortKey, Direction)>,
}

impl Sort {
    /// No ordering.
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(field: CustomerField, direction: Direction) -> Self {
        Self {
            orders: vec![(SortKey::Field(field), direction)],
        }
    }

    /// Order ascending by a raw SQL expression.
    ///
    /// The expression is passed to the database verbatim, so statement
    /// separators and comments are refused.
    pub fn unsafe_by(expr: impl Into<String>) -> Result<Self, DomainError> {
        let mut sort = Self::default();
        sort.push_unsafe(expr, Direction::Asc)?;
        Ok(sort)
    }

    /// Append a field order.
    pub fn then(mut self, field: CustomerField, direction: Direction) -> Self {
        self.orders.push((SortKey::Field(field), direction));
        self
    }

    /// Append a raw expression order.
    pub fn then_unsafe(
        mut self,
        expr: impl Into<String>,
        direction: Direction,
    ) -> Result<Self, DomainError> {
        self.push_unsafe(expr, direction)?;
        Ok(self)
    }

    pub fn orders(&self) -> &[(SortKey, Direction)] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    fn push_unsafe(&mut self, expr: impl Into<String>, direction: Direction) -> Result<(), DomainError> {
        let expr = expr.into();
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "sort expression must not be empty".to_string(),
            ));
        }
        if [";", "--", "/*"].iter().any(|t| trimmed.contains(t)) {
            return Err(DomainError::Validation(format!(
                "sort expression '{}' contains a forbidden token",
                trimmed
            )));
        }
        self.orders
            .push((SortKey::Unsafe(trimmed.to_string()), direction));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsafe_sort_accepts_function_call() {
        let sort = Sort::unsafe_by("LENGTH(password)").unwrap();
        assert_eq!(
            sort.orders(),
            &[(SortKey::Unsafe("LENGTH(password)".to_string()), Direction::Asc)]
        );
    }

    #[test]
    fn test_unsafe_sort_rejects_injection() {
        assert!(Sort::unsafe_by("id; DROP TABLE customers").is_err());
        assert!(Sort::unsafe_by("id -- comment").is_err());
        assert!(Sort::unsafe_by("   ").is_err());
    }

    #[test]
    fn test_chained_orders_keep_sequence() {
        let sort = Sort::by(CustomerField::Up, Direction::Desc)
            .then(CustomerField::Username, Direction::Asc);
        assert_eq!(sort.orders().len(), 2);
        assert_eq!(sort.orders()[0].0, SortKey::Field(CustomerField::Up));
        assert!(!sort.is_unsorted());
        assert!(Sort::unsorted().is_unsorted());
    }
}
