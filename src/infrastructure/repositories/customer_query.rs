//! Translation of domain queries into SeaORM conditions and orderings
//!
//! Specifications and examples are folded into a [`Condition`] here; sorts
//! are applied onto a `Select`. Nothing is evaluated in memory.

use sea_orm::sea_query::{Expr, Func, Order, SimpleExpr};
use sea_orm::{Condition, EntityTrait, QueryFilter, QueryOrder, Select, Value};

use crate::domain::{
    Direction, DomainError, Example, FieldValue, Operator, Predicate, Sort, SortKey,
    Specification,
};
use crate::models::customer::{Column, Entity as CustomerEntity};

/// Validate a specification and build the matching condition.
pub fn to_condition(spec: &Specification) -> Result<Condition, DomainError> {
    spec.validate()?;
    Ok(fold(spec))
}

/// Base query for an example. Examples without constraints select every row.
pub fn example_query(example: &Example) -> Result<Select<CustomerEntity>, DomainError> {
    let query = CustomerEntity::find();
    match example.to_specification() {
        Some(spec) => Ok(query.filter(to_condition(&spec)?)),
        None => Ok(query),
    }
}

/// Append the sort's orders to a query, left to right.
pub fn apply_sort(mut query: Select<CustomerEntity>, sort: &Sort) -> Select<CustomerEntity> {
    for (key, direction) in sort.orders() {
        let order = match direction {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        };
        query = match key {
            SortKey::Field(field) => query.order_by(Column::from(*field), order),
            SortKey::Unsafe(expr) => query.order_by(Expr::cust(expr.as_str()), order),
        };
    }
    query
}

fn fold(spec: &Specification) -> Condition {
    match spec {
        Specification::Predicate(p) => Condition::all().add(predicate_expr(p)),
        Specification::And(l, r) => Condition::all().add(fold(l)).add(fold(r)),
        Specification::Or(l, r) => Condition::any().add(fold(l)).add(fold(r)),
        Specification::Not(inner) => fold(inner).not(),
    }
}

fn predicate_expr(p: &Predicate) -> SimpleExpr {
    let column = SimpleExpr::from(Expr::col((CustomerEntity, Column::from(p.field))));
    let value = if p.operator.is_pattern() {
        SimpleExpr::from(Value::from(glob_pattern(p)))
    } else {
        SimpleExpr::from(operand(p))
    };

    // Both sides go through the same SQL function so case folding agrees.
    let (target, value) = if p.ignore_case {
        (
            SimpleExpr::from(Func::lower(column)),
            SimpleExpr::from(Func::lower(value)),
        )
    } else {
        (column, value)
    };

    match p.operator {
        Operator::StartsWith | Operator::EndsWith | Operator::Contains => {
            Expr::cust_with_exprs("? GLOB ?", [target, value])
        }
        Operator::Eq => Expr::expr(target).eq(value),
        Operator::Ne => Expr::expr(target).ne(value),
        Operator::Lt => Expr::expr(target).lt(value),
        Operator::Le => Expr::expr(target).lte(value),
        Operator::Gt => Expr::expr(target).gt(value),
        Operator::Ge => Expr::expr(target).gte(value),
    }
}

fn operand(p: &Predicate) -> Value {
    match &p.value {
        FieldValue::Integer(v) => Value::from(*v),
        FieldValue::Text(s) => Value::from(s.clone()),
    }
}

/// GLOB pattern for a pattern operator. GLOB is case-sensitive, unlike
/// SQLite's LIKE.
fn glob_pattern(p: &Predicate) -> String {
    let raw = match &p.value {
        FieldValue::Integer(v) => v.to_string(),
        FieldValue::Text(s) => s.clone(),
    };
    let escaped = escape_glob(&raw);
    match p.operator {
        Operator::StartsWith => format!("{}*", escaped),
        Operator::EndsWith => format!("*{}", escaped),
        _ => format!("*{}*", escaped),
    }
}

/// Wrap GLOB metacharacters in single-character classes so they match
/// literally.
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '*' | '?' | '[' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerField, customer_specs};
    use sea_orm::{DbBackend, QueryTrait};

    fn sql_for(spec: &Specification) -> String {
        CustomerEntity::find()
            .filter(to_condition(spec).unwrap())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_escape_glob_metacharacters() {
        assert_eq!(escape_glob("a*b?c[d]"), "a[*]b[?]c[[]d]");
        assert_eq!(escape_glob("50%_off"), "50%_off");
        assert_eq!(escape_glob("ces518"), "ces518");
    }

    #[test]
    fn test_and_of_good_and_bad_renders_both_bounds() {
        let sql = sql_for(&customer_specs::is_good().and(customer_specs::is_bad()));
        assert!(sql.contains(r#""customers"."up" >= 10"#), "{}", sql);
        assert!(sql.contains(r#""customers"."up" <= 0"#), "{}", sql);
        assert!(sql.contains(" AND "), "{}", sql);
    }

    #[test]
    fn test_or_renders_disjunction() {
        let spec = customer_specs::is_good().or(customer_specs::is_bad());
        let sql = sql_for(&spec);
        assert!(sql.contains(" OR "), "{}", sql);
    }

    #[test]
    fn test_ignore_case_lowers_column_and_operand() {
        let spec = Specification::from(
            Predicate::new(CustomerField::Username, Operator::StartsWith, "CES").ignoring_case(),
        );
        let sql = sql_for(&spec);
        assert!(
            sql.contains(r#"LOWER("customers"."username") GLOB LOWER('CES*')"#),
            "{}",
            sql
        );
    }

    #[test]
    fn test_case_sensitive_pattern_uses_plain_glob() {
        let sql = sql_for(&customer_specs::username_starts_with("CES"));
        assert!(sql.contains(r#""customers"."username" GLOB 'CES*'"#), "{}", sql);
        assert!(!sql.contains("LOWER("), "{}", sql);
        assert!(!sql.contains(" LIKE "), "{}", sql);
    }

    #[test]
    fn test_ignore_case_equality_lowers_operand_in_sql() {
        let spec = Specification::from(
            Predicate::new(CustomerField::Username, Operator::Eq, "Élodie").ignoring_case(),
        );
        let sql = sql_for(&spec);
        assert!(sql.contains("LOWER('Élodie')"), "{}", sql);
    }

    #[test]
    fn test_invalid_specification_is_rejected() {
        let spec = Specification::where_(CustomerField::Id, Operator::Contains, 1);
        assert!(matches!(
            to_condition(&spec),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_unsafe_sort_is_rendered_verbatim() {
        let sort = Sort::unsafe_by("LENGTH(password)").unwrap();
        let sql = apply_sort(CustomerEntity::find(), &sort)
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.ends_with("ORDER BY LENGTH(password) ASC"), "{}", sql);
    }
}
