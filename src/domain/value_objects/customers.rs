use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::customers::{CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity};
use crate::domain::value_objects::email::is_valid_email;
use crate::domain::value_objects::enums::entity_statuses::EntityStatus;
use crate::domain::value_objects::pagination::PageQuery;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_ADDRESS_LEN: usize = 100;
pub const MAX_VAT_LEN: usize = 20;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerModel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: String,
    pub address: Option<String>,
    pub vat_number: Option<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerEntity> for CustomerModel {
    fn from(entity: CustomerEntity) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone_number: entity.phone_number,
            address: entity.address,
            vat_number: entity.vat_number,
            status: EntityStatus::from_bool(entity.status),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Trimmed-down shape embedded in invoice listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerSummaryModel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<CustomerEntity> for CustomerSummaryModel {
    fn from(entity: CustomerEntity) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateCustomerModel {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: String,
    pub address: Option<String>,
    pub vat_number: Option<String>,
    pub status: Option<EntityStatus>,
}

impl CreateCustomerModel {
    pub fn validate(&self) -> Result<(), String> {
        validate_name("first_name", &self.first_name)?;
        validate_name("last_name", &self.last_name)?;

        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err("The email must be a valid email address.".to_string());
            }
        }

        if self.phone_number.trim().is_empty() {
            return Err("The phone_number field is required.".to_string());
        }
        if self.phone_number.chars().count() > MAX_PHONE_LEN {
            return Err(format!(
                "The phone_number may not be greater than {} characters.",
                MAX_PHONE_LEN
            ));
        }

        if let Some(address) = &self.address {
            if address.chars().count() > MAX_ADDRESS_LEN {
                return Err(format!(
                    "The address may not be greater than {} characters.",
                    MAX_ADDRESS_LEN
                ));
            }
        }

        if let Some(vat_number) = &self.vat_number {
            if vat_number.chars().count() > MAX_VAT_LEN {
                return Err(format!(
                    "The vat_number may not be greater than {} characters.",
                    MAX_VAT_LEN
                ));
            }
        }

        Ok(())
    }

    pub fn into_entity(self) -> InsertCustomerEntity {
        InsertCustomerEntity {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            address: self.address,
            vat_number: self.vat_number,
            status: self.status.unwrap_or_default().as_bool(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct UpdateCustomerModel {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub vat_number: Option<String>,
    pub status: Option<EntityStatus>,
}

impl UpdateCustomerModel {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(first_name) = &self.first_name {
            validate_name("first_name", first_name)?;
        }
        if let Some(last_name) = &self.last_name {
            validate_name("last_name", last_name)?;
        }

        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err("The email must be a valid email address.".to_string());
            }
        }

        if let Some(phone_number) = &self.phone_number {
            if phone_number.trim().is_empty() {
                return Err("The phone_number field must not be empty.".to_string());
            }
            if phone_number.chars().count() > MAX_PHONE_LEN {
                return Err(format!(
                    "The phone_number may not be greater than {} characters.",
                    MAX_PHONE_LEN
                ));
            }
        }

        if let Some(address) = &self.address {
            if address.chars().count() > MAX_ADDRESS_LEN {
                return Err(format!(
                    "The address may not be greater than {} characters.",
                    MAX_ADDRESS_LEN
                ));
            }
        }

        if let Some(vat_number) = &self.vat_number {
            if vat_number.chars().count() > MAX_VAT_LEN {
                return Err(format!(
                    "The vat_number may not be greater than {} characters.",
                    MAX_VAT_LEN
                ));
            }
        }

        Ok(())
    }

    pub fn into_changeset(self, updated_at: DateTime<Utc>) -> UpdateCustomerEntity {
        UpdateCustomerEntity {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            address: self.address,
            vat_number: self.vat_number,
            status: self.status.map(EntityStatus::as_bool),
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ListCustomersFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ListCustomersFilter {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("The {} field is required.", field));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(format!(
            "The {} may not be greater than {} characters.",
            field, MAX_NAME_LEN
        ));
    }
    Ok(())
}
