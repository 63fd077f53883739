use anyhow::Result;
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::{OptionalExtension, RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::domain::entities::customers::{
    CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity,
};
use crate::domain::repositories::customers::CustomerRepository;
use crate::domain::value_objects::customers::ListCustomersFilter;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::customers;

pub struct CustomerPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CustomerPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CustomerRepository for CustomerPostgres {
    async fn create(&self, customer: InsertCustomerEntity) -> Result<CustomerEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let created = insert_into(customers::table)
            .values(&customer)
            .returning(CustomerEntity::as_returning())
            .get_result::<CustomerEntity>(&mut conn)?;

        Ok(created)
    }

    async fn update(&self, customer_id: i64, changes: UpdateCustomerEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(customers::table.find(customer_id))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn find_by_id(&self, customer_id: i64) -> Result<Option<CustomerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let customer = customers::table
            .find(customer_id)
            .select(CustomerEntity::as_select())
            .first::<CustomerEntity>(&mut conn)
            .optional()?;

        Ok(customer)
    }

    async fn list(&self, filter: &ListCustomersFilter) -> Result<(Vec<CustomerEntity>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut count_query = customers::table.select(count_star()).into_boxed();
        if let Some(first_name) = &filter.first_name {
            count_query = count_query.filter(customers::first_name.like(format!("%{}%", first_name)));
        }
        if let Some(last_name) = &filter.last_name {
            count_query = count_query.filter(customers::last_name.like(format!("%{}%", last_name)));
        }
        let total = count_query.first::<i64>(&mut conn)?;

        let mut query = customers::table
            .select(CustomerEntity::as_select())
            .into_boxed();
        if let Some(first_name) = &filter.first_name {
            query = query.filter(customers::first_name.like(format!("%{}%", first_name)));
        }
        if let Some(last_name) = &filter.last_name {
            query = query.filter(customers::last_name.like(format!("%{}%", last_name)));
        }

        let page_query = filter.page_query();
        let rows = query
            .order(customers::id.desc())
            .limit(page_query.per_page())
            .offset(page_query.offset())
            .load::<CustomerEntity>(&mut conn)?;

        Ok((rows, total))
    }

    async fn exists_by_contact(
        &self,
        email: Option<String>,
        phone_number: String,
        except_id: Option<i64>,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = customers::table.select(count_star()).into_boxed();

        query = match email {
            Some(email) => query.filter(
                customers::email
                    .eq(email)
                    .or(customers::phone_number.eq(phone_number)),
            ),
            None => query.filter(customers::phone_number.eq(phone_number)),
        };

        if let Some(except_id) = except_id {
            query = query.filter(customers::id.ne(except_id));
        }

        let conflicts = query.first::<i64>(&mut conn)?;

        Ok(conflicts > 0)
    }

    async fn delete_by_id(&self, customer_id: i64) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(customers::table.find(customer_id)).execute(&mut conn)?;

        Ok(deleted)
    }
}
