use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::invoices::{InvoiceEntity, InvoiceItemEntity};
use crate::domain::value_objects::customers::{CustomerModel, CustomerSummaryModel};
use crate::domain::value_objects::enums::entity_statuses::EntityStatus;
use crate::domain::value_objects::pagination::PageQuery;

pub const MAX_ITEM_NAME_LEN: usize = 50;

/// Numbers look like `INV2026-0001`; the sequence is scoped per year.
pub fn format_invoice_number(year: i32, sequence: i64) -> String {
    format!("INV{}-{:04}", year, sequence)
}

pub fn invoice_sequence_scope(year: i32) -> String {
    format!("invoices:{}", year)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceModel {
    pub id: i64,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub description: Option<String>,
    pub exchange_rate: Option<BigDecimal>,
    pub sub_total: Option<BigDecimal>,
    pub tax: Option<BigDecimal>,
    pub total: Option<BigDecimal>,
    pub paid: Option<BigDecimal>,
    pub balance: Option<BigDecimal>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvoiceEntity> for InvoiceModel {
    fn from(entity: InvoiceEntity) -> Self {
        Self {
            id: entity.id,
            invoice_number: entity.invoice_number,
            issue_date: entity.issue_date,
            due_date: entity.due_date,
            description: entity.description,
            exchange_rate: entity.exchange_rate,
            sub_total: entity.sub_total,
            tax: entity.tax,
            total: entity.total,
            paid: entity.paid,
            balance: entity.balance,
            status: EntityStatus::from_bool(entity.status),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceItemModel {
    pub id: i64,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvoiceItemEntity> for InvoiceItemModel {
    fn from(entity: InvoiceItemEntity) -> Self {
        Self {
            id: entity.id,
            item_name: entity.item_name,
            quantity: entity.quantity,
            unit_price: entity.unit_price,
            total: entity.total,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// One row of `GET /v1/invoices`: the invoice plus a customer summary and
/// the number of line items (the items themselves stay out of listings).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceListItemModel {
    #[serde(flatten)]
    pub invoice: InvoiceModel,
    pub customer: CustomerSummaryModel,
    pub total_items: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceDetailModel {
    #[serde(flatten)]
    pub invoice: InvoiceModel,
    pub customer: CustomerModel,
    pub invoice_items: Vec<InvoiceItemModel>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateInvoiceModel {
    pub customer_id: i64,
    pub invoice_number: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub description: Option<String>,
    pub exchange_rate: Option<BigDecimal>,
    pub sub_total: Option<BigDecimal>,
    pub tax: Option<BigDecimal>,
    pub total: Option<BigDecimal>,
    pub paid: Option<BigDecimal>,
    pub balance: Option<BigDecimal>,
    pub status: Option<EntityStatus>,
    pub invoice_items: Option<Vec<CreateInvoiceItemModel>>,
}

impl CreateInvoiceModel {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(invoice_number) = &self.invoice_number {
            if invoice_number.trim().is_empty() {
                return Err("The invoice_number field must not be empty.".to_string());
            }
        }

        if let Some(items) = &self.invoice_items {
            for item in items {
                item.validate()?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct UpdateInvoiceModel {
    pub customer_id: Option<i64>,
    pub invoice_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub exchange_rate: Option<BigDecimal>,
    pub sub_total: Option<BigDecimal>,
    pub tax: Option<BigDecimal>,
    pub total: Option<BigDecimal>,
    pub paid: Option<BigDecimal>,
    pub balance: Option<BigDecimal>,
    pub status: Option<EntityStatus>,
    pub invoice_items: Option<Vec<CreateInvoiceItemModel>>,
}

impl UpdateInvoiceModel {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(invoice_number) = &self.invoice_number {
            if invoice_number.trim().is_empty() {
                return Err("The invoice_number field must not be empty.".to_string());
            }
        }

        if let Some(items) = &self.invoice_items {
            for item in items {
                item.validate()?;
            }
        }

        Ok(())
    }
}

/// Caller-supplied `total` is accepted in the payload for compatibility but
/// never trusted; the server recomputes it from quantity and unit price.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateInvoiceItemModel {
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub total: Option<BigDecimal>,
}

impl CreateInvoiceItemModel {
    pub fn validate(&self) -> Result<(), String> {
        if self.item_name.trim().is_empty() {
            return Err("The item_name field is required.".to_string());
        }
        if self.item_name.chars().count() > MAX_ITEM_NAME_LEN {
            return Err(format!(
                "The item_name may not be greater than {} characters.",
                MAX_ITEM_NAME_LEN
            ));
        }
        if self.quantity < 0 {
            return Err("The quantity must be at least 0.".to_string());
        }
        Ok(())
    }

    pub fn computed_total(&self) -> BigDecimal {
        BigDecimal::from(self.quantity) * &self.unit_price
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ListInvoicesFilter {
    pub invoice_number: Option<String>,
    pub customer_id: Option<i64>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ListInvoicesFilter {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i32, unit_price: i64) -> CreateInvoiceItemModel {
        CreateInvoiceItemModel {
            item_name: name.to_string(),
            quantity,
            unit_price: BigDecimal::from(unit_price),
            total: None,
        }
    }

    #[test]
    fn invoice_numbers_are_zero_padded_per_year() {
        assert_eq!(format_invoice_number(2026, 1), "INV2026-0001");
        assert_eq!(format_invoice_number(2026, 42), "INV2026-0042");
        assert_eq!(format_invoice_number(2030, 12345), "INV2030-12345");
        assert_eq!(invoice_sequence_scope(2026), "invoices:2026");
    }

    #[test]
    fn item_total_is_quantity_times_unit_price() {
        assert_eq!(item("A", 2, 50).computed_total(), BigDecimal::from(100));
        assert_eq!(item("B", 0, 99).computed_total(), BigDecimal::from(0));
    }

    #[test]
    fn caller_supplied_item_total_does_not_affect_computation() {
        let mut tampered = item("A", 2, 50);
        tampered.total = Some(BigDecimal::from(1));
        assert_eq!(tampered.computed_total(), BigDecimal::from(100));
    }

    #[test]
    fn blank_item_name_is_rejected() {
        let bad = item("   ", 1, 10);
        assert_eq!(
            bad.validate(),
            Err("The item_name field is required.".to_string())
        );
    }

    #[test]
    fn overlong_item_name_is_rejected() {
        let bad = item(&"x".repeat(MAX_ITEM_NAME_LEN + 1), 1, 10);
        assert_eq!(
            bad.validate(),
            Err("The item_name may not be greater than 50 characters.".to_string())
        );
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let bad = item("A", -1, 10);
        assert_eq!(
            bad.validate(),
            Err("The quantity must be at least 0.".to_string())
        );
    }

    #[test]
    fn first_invalid_item_stops_validation() {
        let model = CreateInvoiceModel {
            customer_id: 1,
            invoice_number: None,
            issue_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            description: None,
            exchange_rate: None,
            sub_total: None,
            tax: None,
            total: None,
            paid: None,
            balance: None,
            status: None,
            invoice_items: Some(vec![item("ok", 1, 10), item("", 1, 10), item("x", -5, 10)]),
        };
        assert_eq!(
            model.validate(),
            Err("The item_name field is required.".to_string())
        );
    }
}
