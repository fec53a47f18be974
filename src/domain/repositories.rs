//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use super::customer::{Customer, CustomerSummary};
use super::example::Example;
use super::sort::Sort;
use super::specification::Specification;

/// Paginated result with total count
#[derive(Debug)]
pub struct PaginatedCustomers {
    pub customers: Vec<Customer>,
    pub total: u64,
}

/// Repository trait for Customer entity
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer and write the generated id back into it.
    ///
    /// A customer that already carries an id is inserted with that id, so a
    /// duplicate surfaces as [`DomainError::Constraint`].
    async fn create(&self, customer: &mut Customer) -> Result<(), DomainError>;

    /// Merge a customer's state into storage and return a fresh copy.
    ///
    /// The row is updated when the id is known and inserted otherwise. The
    /// argument is never modified.
    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError>;

    /// Insert transient customers, merge the rest.
    async fn save(&self, mut customer: Customer) -> Result<Customer, DomainError> {
        if customer.is_transient() {
            self.create(&mut customer).await?;
            Ok(customer)
        } else {
            self.update(&customer).await
        }
    }

    /// Find all customers
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError>;

    /// Find a customer by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    /// Delete a customer by ID
    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError>;

    /// One zero-based page of customers ordered by id
    async fn find_page(&self, page: u64, size: u64) -> Result<PaginatedCustomers, DomainError>;

    async fn find_by_username_starts_with(
        &self,
        prefix: &str,
    ) -> Result<Vec<Customer>, DomainError>;

    /// Customers with the given password, in caller-defined order
    async fn find_by_password(
        &self,
        password: &str,
        sort: &Sort,
    ) -> Result<Vec<Customer>, DomainError>;

    /// Bulk-set the password of one row, returning the number of rows touched.
    async fn update_customer(&self, new_password: &str, id: i32) -> Result<u64, DomainError>;

    /// Summaries (username and votes) of customers with the given username
    async fn find_by_username(&self, username: &str)
    -> Result<Vec<CustomerSummary>, DomainError>;

    async fn find_all_matching(&self, spec: &Specification) -> Result<Vec<Customer>, DomainError>;

    async fn find_all_matching_sorted(
        &self,
        spec: &Specification,
        sort: &Sort,
    ) -> Result<Vec<Customer>, DomainError>;

    async fn count_matching(&self, spec: &Specification) -> Result<u64, DomainError>;

    async fn find_all_by_example(&self, example: &Example) -> Result<Vec<Customer>, DomainError>;

    /// The single customer matching the example, if any.
    ///
    /// More than one match is [`DomainError::NonUniqueResult`].
    async fn find_one_by_example(&self, example: &Example)
    -> Result<Option<Customer>, DomainError>;

    async fn count_by_example(&self, example: &Example) -> Result<u64, DomainError>;

    async fn exists_by_example(&self, example: &Example) -> Result<bool, DomainError> {
        Ok(self.count_by_example(example).await? > 0)
    }
}
