//! Customer entity and its read-only projection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Votes at or above this mark make a customer "good".
pub const GOOD_VOTES_THRESHOLD: i32 = 10;

/// Votes at or below this mark make a customer "bad".
pub const BAD_VOTES_THRESHOLD: i32 = 0;

/// A customer record.
///
/// The id stays `None` while the value is transient. It is assigned once,
/// either by the repository on insert or explicitly through the builder,
/// and cannot be changed afterwards.
#[derive(Clone, PartialEq, Eq, Default, Serialize)]
pub struct Customer {
    id: Option<i32>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub up: i32,
}

impl Customer {
    /// Create a builder for a transient customer.
    pub fn builder() -> CustomerBuilder {
        CustomerBuilder::default()
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    /// Whether the customer has not been persisted yet.
    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_good(&self) -> bool {
        self.up >= GOOD_VOTES_THRESHOLD
    }

    pub fn is_bad(&self) -> bool {
        self.up <= BAD_VOTES_THRESHOLD
    }

    /// Record the identity handed out by storage. Only the first assignment
    /// sticks.
    pub(crate) fn assign_id(&mut self, id: i32) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// Rebuild a persistent customer from a stored row.
    pub(crate) fn restore(id: i32, username: String, password: String, up: i32) -> Self {
        Self {
            id: Some(id),
            username,
            password,
            up,
        }
    }
}

impl fmt::Debug for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("up", &self.up)
            .finish()
    }
}

/// Placeholder printed instead of a password.
pub(crate) const REDACTED: &str = "[REDACTED]";

/// Builder for constructing [`Customer`] values.
#[derive(Clone, Default)]
pub struct CustomerBuilder {
    id: Option<i32>,
    username: String,
    password: String,
    up: i32,
}

impl CustomerBuilder {
    /// Set an explicit id. Saving such a customer merges instead of inserting.
    pub fn id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn up(mut self, up: i32) -> Self {
        self.up = up;
        self
    }

    pub fn build(self) -> Customer {
        Customer {
            id: self.id,
            username: self.username,
            password: self.password,
            up: self.up,
        }
    }
}

impl fmt::Debug for CustomerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerBuilder")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("up", &self.up)
            .finish()
    }
}

/// Read-only summary of a customer: username and vote count, no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub username: String,
    pub votes: i32,
}

/// Attributes of a customer that queries can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerField {
    Id,
    Username,
    Password,
    Up,
}

/// Storage kind of a [`CustomerField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
}

impl CustomerField {
    pub fn kind(self) -> FieldKind {
        match self {
            CustomerField::Id | CustomerField::Up => FieldKind::Integer,
            CustomerField::Username | CustomerField::Password => FieldKind::Text,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CustomerField::Id => "id",
            CustomerField::Username => "username",
            CustomerField::Password => "password",
            CustomerField::Up => "up",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_produces_transient_customer() {
        let customer = Customer::builder()
            .username("ces518")
            .password("pjy3859")
            .build();

        assert!(customer.is_transient());
        assert_eq!(customer.username, "ces518");
        assert_eq!(customer.password, "pjy3859");
        assert_eq!(customer.up, 0);
    }

    #[test]
    fn test_assigned_id_is_not_overwritten() {
        let mut customer = Customer::builder().id(7).username("a").build();
        customer.assign_id(42);
        assert_eq!(customer.id(), Some(7));

        let mut fresh = Customer::builder().username("b").build();
        fresh.assign_id(3);
        fresh.assign_id(4);
        assert_eq!(fresh.id(), Some(3));
    }

    #[test]
    fn test_good_and_bad_are_exclusive() {
        for up in [-5, 0, 1, 9, 10, 50] {
            let customer = Customer::builder().up(up).build();
            assert!(!(customer.is_good() && customer.is_bad()), "up = {}", up);
        }
    }

    #[test]
    fn test_password_is_not_serialized() {
        let customer = Customer::builder()
            .username("ces518")
            .password("secret")
            .build();
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "ces518");
    }

    #[test]
    fn test_debug_output_redacts_password() {
        let builder = Customer::builder().username("ces518").password("pjy3859");
        let customer = builder.clone().build();

        for output in [format!("{:?}", customer), format!("{:?}", builder)] {
            assert!(!output.contains("pjy3859"), "{}", output);
            assert!(output.contains("[REDACTED]"), "{}", output);
            assert!(output.contains("ces518"), "{}", output);
        }
    }
}
