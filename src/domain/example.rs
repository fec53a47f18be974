//! Query by example
//!
//! A [`CustomerProbe`] lists the fields to match on; unset fields are left
//! out of the query. The [`ExampleMatcher`] decides whether all or any of
//! the remaining fields must match and how text is compared. The pair is
//! turned into a [`Specification`] so it runs through the same query
//! builder as hand-written specifications.

use std::collections::BTreeSet;
use std::fmt;

use super::customer::{Customer, CustomerField, REDACTED};
use super::specification::{FieldValue, Operator, Predicate, Specification};

/// Sparse prototype of a customer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CustomerProbe {
    pub id: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub up: Option<i32>,
}

impl CustomerProbe {
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_up(mut self, up: i32) -> Self {
        self.up = Some(up);
        self
    }

    /// Populated fields in declaration order.
    pub fn populated(&self) -> Vec<(CustomerField, FieldValue)> {
        let mut fields = Vec::new();
        if let Some(id) = self.id {
            fields.push((CustomerField::Id, FieldValue::Integer(id)));
        }
        if let Some(username) = &self.username {
            fields.push((CustomerField::Username, FieldValue::Text(username.clone())));
        }
        if let Some(password) = &self.password {
            fields.push((CustomerField::Password, FieldValue::Text(password.clone())));
        }
        if let Some(up) = self.up {
            fields.push((CustomerField::Up, FieldValue::Integer(up)));
        }
        fields
    }
}

impl fmt::Debug for CustomerProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerProbe")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("up", &self.up)
            .finish()
    }
}

/// Fields holding default values (no id, empty text, zero votes) are left
/// unset.
impl From<&Customer> for CustomerProbe {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id(),
            username: Some(customer.username.clone()).filter(|s| !s.is_empty()),
            password: Some(customer.password.clone()).filter(|s| !s.is_empty()),
            up: Some(customer.up).filter(|&up| up != 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    All,
    Any,
}

/// How text fields are compared against the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringMatcher {
    #[default]
    Exact,
    Starting,
    Ending,
    Contains,
}

impl StringMatcher {
    fn operator(self) -> Operator {
        match self {
            StringMatcher::Exact => Operator::Eq,
            StringMatcher::Starting => Operator::StartsWith,
            StringMatcher::Ending => Operator::EndsWith,
            StringMatcher::Contains => Operator::Contains,
        }
    }
}

/// Matching policy for an [`Example`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleMatcher {
    mode: MatchMode,
    string_matcher: StringMatcher,
    ignore_case: bool,
    ignored: BTreeSet<CustomerField>,
}

impl ExampleMatcher {
    /// Every populated field must match.
    pub fn matching_all() -> Self {
        Self::default()
    }

    /// At least one populated field must match.
    pub fn matching_any() -> Self {
        Self {
            mode: MatchMode::Any,
            ..Self::default()
        }
    }

    pub fn with_string_matcher(mut self, matcher: StringMatcher) -> Self {
        self.string_matcher = matcher;
        self
    }

    pub fn with_ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Leave these fields out of the match even when the probe sets them.
    pub fn with_ignore_paths(mut self, fields: impl IntoIterator<Item = CustomerField>) -> Self {
        self.ignored.extend(fields);
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_ignored(&self, field: CustomerField) -> bool {
        self.ignored.contains(&field)
    }
}

/// A probe paired with its matching policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Example {
    pub probe: CustomerProbe,
    pub matcher: ExampleMatcher,
}

impl Example {
    /// Example with the default match-all policy.
    pub fn new(probe: CustomerProbe) -> Self {
        Self::of(probe, ExampleMatcher::matching_all())
    }

    pub fn of(probe: CustomerProbe, matcher: ExampleMatcher) -> Self {
        Self { probe, matcher }
    }

    /// Build the equivalent specification. `None` means the example puts no
    /// constraint on the result.
    pub fn to_specification(&self) -> Option<Specification> {
        let matcher = &self.matcher;
        let mut predicates = self
            .probe
            .populated()
            .into_iter()
            .filter(|(field, _)| !matcher.is_ignored(*field))
            .map(|(field, value)| match value {
                FieldValue::Text(text) => {
                    let predicate =
                        Predicate::new(field, matcher.string_matcher.operator(), text);
                    if matcher.ignore_case {
                        predicate.ignoring_case()
                    } else {
                        predicate
                    }
                }
                FieldValue::Integer(_) => Predicate::new(field, Operator::Eq, value),
            })
            .map(Specification::from);

        let first = predicates.next()?;
        Some(predicates.fold(first, |acc, next| match matcher.mode {
            MatchMode::All => acc.and(next),
            MatchMode::Any => acc.or(next),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_customer_probe_is_empty() {
        let probe = CustomerProbe::from(&Customer::default());
        assert!(probe.populated().is_empty());
        assert_eq!(Example::new(probe).to_specification(), None);
    }

    #[test]
    fn test_probe_from_customer_skips_defaults() {
        let customer = Customer::builder().username("ces518").up(0).build();
        let probe = CustomerProbe::from(&customer);
        assert_eq!(probe.username.as_deref(), Some("ces518"));
        assert_eq!(probe.password, None);
        assert_eq!(probe.up, None);
    }

    #[test]
    fn test_example_debug_redacts_password() {
        let probe = CustomerProbe::default()
            .with_username("ces518")
            .with_password("pjy3859");
        let example = Example::new(probe.clone());

        for output in [format!("{:?}", probe), format!("{:?}", example)] {
            assert!(!output.contains("pjy3859"), "{}", output);
            assert!(output.contains("[REDACTED]"), "{}", output);
        }
        assert!(!format!("{:?}", CustomerProbe::default()).contains("[REDACTED]"));
    }

    #[test]
    fn test_match_any_builds_or_chain() {
        let probe = CustomerProbe::default().with_username("ces518").with_up(10);
        let spec = Example::of(probe, ExampleMatcher::matching_any())
            .to_specification()
            .unwrap();

        assert_eq!(
            spec,
            Specification::where_(CustomerField::Username, Operator::Eq, "ces518")
                .or(Specification::where_(CustomerField::Up, Operator::Eq, 10))
        );
    }

    #[test]
    fn test_ignored_paths_and_string_matcher() {
        let probe = CustomerProbe::default()
            .with_username("ces")
            .with_password("secret");
        let matcher = ExampleMatcher::matching_all()
            .with_string_matcher(StringMatcher::Starting)
            .with_ignore_case()
            .with_ignore_paths([CustomerField::Password]);

        let spec = Example::of(probe, matcher).to_specification().unwrap();

        assert_eq!(
            spec,
            Specification::from(
                Predicate::new(CustomerField::Username, Operator::StartsWith, "ces")
                    .ignoring_case()
            )
        );
    }
}
