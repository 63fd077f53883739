use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::{invoice_items, invoices};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = invoices)]
pub struct InvoiceEntity {
    pub id: i64,
    pub customer_id: i64,
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
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct InsertInvoiceEntity {
    pub customer_id: i64,
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
    pub status: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invoices)]
pub struct UpdateInvoiceEntity {
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
    pub status: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations)]
#[diesel(table_name = invoice_items)]
#[diesel(belongs_to(InvoiceEntity, foreign_key = invoice_id))]
pub struct InvoiceItemEntity {
    pub id: i64,
    pub invoice_id: i64,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `invoice_id` is filled in by the repository once the owning invoice row
/// exists inside the same transaction.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoice_items)]
pub struct InsertInvoiceItemEntity {
    pub invoice_id: Option<i64>,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub total: BigDecimal,
}
