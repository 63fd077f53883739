use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::customers::CustomerEntity;
use crate::domain::entities::invoices::{
    InsertInvoiceEntity, InsertInvoiceItemEntity, InvoiceEntity, InvoiceItemEntity,
    UpdateInvoiceEntity,
};
use crate::domain::value_objects::invoices::ListInvoicesFilter;

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    /// Inserts the invoice and its item rows as one transaction.
    async fn create_with_items(
        &self,
        invoice: InsertInvoiceEntity,
        items: Vec<InsertInvoiceItemEntity>,
    ) -> Result<InvoiceEntity>;

    /// Applies the changeset, deletes all existing items and inserts the
    /// replacement set as one transaction.
    async fn update_with_items(
        &self,
        invoice_id: i64,
        changes: UpdateInvoiceEntity,
        items: Vec<InsertInvoiceItemEntity>,
    ) -> Result<()>;

    async fn find_by_id(&self, invoice_id: i64) -> Result<Option<InvoiceEntity>>;

    async fn find_detail(
        &self,
        invoice_id: i64,
    ) -> Result<Option<(InvoiceEntity, CustomerEntity, Vec<InvoiceItemEntity>)>>;

    async fn list(
        &self,
        filter: &ListInvoicesFilter,
    ) -> Result<(Vec<(InvoiceEntity, CustomerEntity)>, i64)>;

    async fn count_items(&self, invoice_ids: Vec<i64>) -> Result<Vec<(i64, i64)>>;

    async fn exists_by_number(&self, invoice_number: &str, except_id: Option<i64>) -> Result<bool>;

    /// Next value of the atomic counter identified by `scope`
    /// (e.g. `invoices:2026`). Starts at 1 for a fresh scope.
    async fn next_sequence(&self, scope: &str) -> Result<i64>;

    async fn delete_by_id(&self, invoice_id: i64) -> Result<usize>;
}
