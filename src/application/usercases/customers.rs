use chrono::Utc;
use std::sync::Arc;

use crate::domain::error::AppError;
use crate::domain::repositories::customers::CustomerRepository;
use crate::domain::value_objects::customers::{
    CreateCustomerModel, CustomerModel, ListCustomersFilter, UpdateCustomerModel,
};
use crate::domain::value_objects::pagination::Paginated;

pub struct CustomerUseCase<C>
where
    C: CustomerRepository + Send + Sync,
{
    customer_repository: Arc<C>,
}

impl<C> CustomerUseCase<C>
where
    C: CustomerRepository + Send + Sync,
{
    pub fn new(customer_repository: Arc<C>) -> Self {
        Self {
            customer_repository,
        }
    }

    pub async fn create(&self, model: CreateCustomerModel) -> Result<CustomerModel, AppError> {
        model.validate().map_err(AppError::UnprocessableEntity)?;

        let conflict = self
            .customer_repository
            .exists_by_contact(model.email.clone(), model.phone_number.clone(), None)
            .await?;
        if conflict {
            return Err(AppError::BadRequest("Customer already exists".to_string()));
        }

        let created = self.customer_repository.create(model.into_entity()).await?;

        Ok(CustomerModel::from(created))
    }

    pub async fn update(
        &self,
        customer_id: i64,
        model: UpdateCustomerModel,
    ) -> Result<(), AppError> {
        model.validate().map_err(AppError::UnprocessableEntity)?;

        let Some(existing) = self.customer_repository.find_by_id(customer_id).await? else {
            return Err(AppError::NotFound("Customer not found".to_string()));
        };

        // Only guard when the caller is changing contact details.
        if model.email.is_some() || model.phone_number.is_some() {
            let phone_number = model
                .phone_number
                .clone()
                .unwrap_or(existing.phone_number.clone());
            let conflict = self
                .customer_repository
                .exists_by_contact(model.email.clone(), phone_number, Some(customer_id))
                .await?;
            if conflict {
                return Err(AppError::BadRequest("Customer already exists".to_string()));
            }
        }

        self.customer_repository
            .update(customer_id, model.into_changeset(Utc::now()))
            .await?;

        Ok(())
    }

    pub async fn list(
        &self,
        filter: ListCustomersFilter,
    ) -> Result<Paginated<CustomerModel>, AppError> {
        let page_query = filter.page_query();
        let (rows, total) = self.customer_repository.list(&filter).await?;

        let data = rows.into_iter().map(CustomerModel::from).collect();

        Ok(Paginated::new(
            data,
            total,
            page_query.page(),
            page_query.per_page(),
        ))
    }

    pub async fn show(&self, customer_id: i64) -> Result<CustomerModel, AppError> {
        let Some(customer) = self.customer_repository.find_by_id(customer_id).await? else {
            return Err(AppError::NotFound("Customer not found".to_string()));
        };

        Ok(CustomerModel::from(customer))
    }

    pub async fn delete(&self, customer_id: i64) -> Result<(), AppError> {
        if self
            .customer_repository
            .find_by_id(customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }

        let deleted = self.customer_repository.delete_by_id(customer_id).await?;
        if deleted == 0 {
            return Err(AppError::BadRequest("Customer not deleted".to_string()));
        }

        Ok(())
    }
}
