//! SeaORM implementation of CustomerRepository
//!
//! There is no identity map: every read goes to the database, so bulk
//! updates are visible to the next query without any cache invalidation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::customer_query::{apply_sort, example_query, to_condition};
use crate::domain::{
    Customer, CustomerRepository, CustomerSummary, DomainError, Example, PaginatedCustomers, Sort,
    Specification, customer_specs,
};
use crate::models::customer::{ActiveModel, Column, Entity as CustomerEntity};

/// Row shape of the summary projection
#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    username: String,
    votes: i32,
}

/// SeaORM-based implementation of CustomerRepository
pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn create(&self, customer: &mut Customer) -> Result<(), DomainError> {
        let model = ActiveModel::from(&*customer).insert(&self.db).await?;
        customer.assign_id(model.id);

        tracing::info!(customer_id = model.id, "Inserted customer");
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let existing = match customer.id() {
            Some(id) => CustomerEntity::find_by_id(id).one(&self.db).await?,
            None => None,
        };

        let model = match existing {
            Some(existing) => {
                let mut active: ActiveModel = existing.into();
                active.username = Set(customer.username.clone());
                active.password = Set(customer.password.clone());
                active.up = Set(customer.up);
                active.update(&self.db).await?
            }
            None => {
                tracing::debug!(
                    customer_id = ?customer.id(),
                    "Merge target not stored yet, inserting"
                );
                ActiveModel::from(customer).insert(&self.db).await?
            }
        };

        tracing::info!(customer_id = model.id, "Merged customer");
        Ok(Customer::from(model))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        let customers = CustomerEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let customer = CustomerEntity::find_by_id(id).one(&self.db).await?;

        Ok(customer.map(Customer::from))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DomainError> {
        let count = CustomerEntity::find()
            .filter(Column::Id.eq(id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(CustomerEntity::find().count(&self.db).await?)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        let result = CustomerEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn find_page(&self, page: u64, size: u64) -> Result<PaginatedCustomers, DomainError> {
        if size == 0 {
            return Err(DomainError::Validation(
                "page size must be greater than zero".to_string(),
            ));
        }
        // SQLite binds LIMIT/OFFSET as signed 64-bit integers
        let in_range = |n: u64| i64::try_from(n).is_ok();
        let offset = page.checked_mul(size);
        if !in_range(size) || !offset.is_some_and(in_range) {
            return Err(DomainError::Validation(format!(
                "page {} of size {} is out of range",
                page, size
            )));
        }

        let paginator = CustomerEntity::find()
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page).await?;

        Ok(PaginatedCustomers {
            customers: items.into_iter().map(Customer::from).collect(),
            total,
        })
    }

    async fn find_by_username_starts_with(
        &self,
        prefix: &str,
    ) -> Result<Vec<Customer>, DomainError> {
        self.find_all_matching(&customer_specs::username_starts_with(prefix))
            .await
    }

    async fn find_by_password(
        &self,
        password: &str,
        sort: &Sort,
    ) -> Result<Vec<Customer>, DomainError> {
        let query = CustomerEntity::find().filter(Column::Password.eq(password));
        let customers = apply_sort(query, sort).all(&self.db).await?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn update_customer(&self, new_password: &str, id: i32) -> Result<u64, DomainError> {
        let result = CustomerEntity::update_many()
            .col_expr(Column::Password, Expr::value(new_password))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        tracing::info!(
            customer_id = id,
            rows_affected = result.rows_affected,
            "Bulk password update"
        );
        Ok(result.rows_affected)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<CustomerSummary>, DomainError> {
        let rows = CustomerEntity::find()
            .select_only()
            .column(Column::Username)
            .column_as(Column::Up, "votes")
            .filter(Column::Username.eq(username))
            .order_by_asc(Column::Id)
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| CustomerSummary {
                username: r.username,
                votes: r.votes,
            })
            .collect())
    }

    async fn find_all_matching(&self, spec: &Specification) -> Result<Vec<Customer>, DomainError> {
        let customers = CustomerEntity::find()
            .filter(to_condition(spec)?)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn find_all_matching_sorted(
        &self,
        spec: &Specification,
        sort: &Sort,
    ) -> Result<Vec<Customer>, DomainError> {
        let query = CustomerEntity::find().filter(to_condition(spec)?);
        let customers = apply_sort(query, sort).all(&self.db).await?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn count_matching(&self, spec: &Specification) -> Result<u64, DomainError> {
        let count = CustomerEntity::find()
            .filter(to_condition(spec)?)
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn find_all_by_example(&self, example: &Example) -> Result<Vec<Customer>, DomainError> {
        let fields: Vec<&str> = example
            .probe
            .populated()
            .iter()
            .map(|(field, _)| field.name())
            .collect();
        tracing::debug!(
            "Find by example - Fields: {:?}, mode: {:?}",
            fields,
            example.matcher.mode()
        );

        let customers = example_query(example)?
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn find_one_by_example(
        &self,
        example: &Example,
    ) -> Result<Option<Customer>, DomainError> {
        let mut customers = self.find_all_by_example(example).await?;

        match customers.len() {
            0 => Ok(None),
            1 => Ok(customers.pop()),
            n => Err(DomainError::NonUniqueResult(n)),
        }
    }

    async fn count_by_example(&self, example: &Example) -> Result<u64, DomainError> {
        Ok(example_query(example)?.count(&self.db).await?)
    }
}
