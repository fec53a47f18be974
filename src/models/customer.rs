use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::domain::{Customer, CustomerField};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub password: String,
    #[sea_orm(default_value = 0)]
    pub up: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Customer {
    fn from(model: Model) -> Self {
        Customer::restore(model.id, model.username, model.password, model.up)
    }
}

impl From<&Customer> for ActiveModel {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().map_or(NotSet, Set),
            username: Set(customer.username.clone()),
            password: Set(customer.password.clone()),
            up: Set(customer.up),
        }
    }
}

impl From<CustomerField> for Column {
    fn from(field: CustomerField) -> Self {
        match field {
            CustomerField::Id => Column::Id,
            CustomerField::Username => Column::Username,
            CustomerField::Password => Column::Password,
            CustomerField::Up => Column::Up,
        }
    }
}
