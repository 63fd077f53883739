use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::customers::{
    CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity,
};
use crate::domain::value_objects::customers::ListCustomersFilter;

#[async_trait]
#[automock]
pub trait CustomerRepository {
    async fn create(&self, customer: InsertCustomerEntity) -> Result<CustomerEntity>;

    async fn update(&self, customer_id: i64, changes: UpdateCustomerEntity) -> Result<()>;

    async fn find_by_id(&self, customer_id: i64) -> Result<Option<CustomerEntity>>;

    async fn list(&self, filter: &ListCustomersFilter) -> Result<(Vec<CustomerEntity>, i64)>;

    /// True when another customer already uses this email or phone number.
    async fn exists_by_contact(
        &self,
        email: Option<String>,
        phone_number: String,
        except_id: Option<i64>,
    ) -> Result<bool>;

    async fn delete_by_id(&self, customer_id: i64) -> Result<usize>;
}
