use anyhow::Result;
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::{Connection, OptionalExtension, RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::domain::entities::customers::CustomerEntity;
use crate::domain::entities::invoices::{
    InsertInvoiceEntity, InsertInvoiceItemEntity, InvoiceEntity, InvoiceItemEntity,
    UpdateInvoiceEntity,
};
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::invoices::ListInvoicesFilter;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{counters, customers, invoice_items, invoices};

pub struct InvoicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn create_with_items(
        &self,
        invoice: InsertInvoiceEntity,
        mut items: Vec<InsertInvoiceItemEntity>,
    ) -> Result<InvoiceEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let created = conn.transaction::<InvoiceEntity, diesel::result::Error, _>(|tx| {
            let created = insert_into(invoices::table)
                .values(&invoice)
                .returning(InvoiceEntity::as_returning())
                .get_result::<InvoiceEntity>(tx)?;

            for item in items.iter_mut() {
                item.invoice_id = Some(created.id);
            }

            if !items.is_empty() {
                insert_into(invoice_items::table).values(&items).execute(tx)?;
            }

            Ok(created)
        })?;

        Ok(created)
    }

    async fn update_with_items(
        &self,
        invoice_id: i64,
        changes: UpdateInvoiceEntity,
        mut items: Vec<InsertInvoiceItemEntity>,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<(), diesel::result::Error, _>(|tx| {
            update(invoices::table.find(invoice_id))
                .set(&changes)
                .execute(tx)?;

            // The item set is replaced wholesale on every update.
            delete(invoice_items::table.filter(invoice_items::invoice_id.eq(invoice_id)))
                .execute(tx)?;

            for item in items.iter_mut() {
                item.invoice_id = Some(invoice_id);
            }

            if !items.is_empty() {
                insert_into(invoice_items::table).values(&items).execute(tx)?;
            }

            Ok(())
        })?;

        Ok(())
    }

    async fn find_by_id(&self, invoice_id: i64) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = invoices::table
            .find(invoice_id)
            .select(InvoiceEntity::as_select())
            .first::<InvoiceEntity>(&mut conn)
            .optional()?;

        Ok(invoice)
    }

    async fn find_detail(
        &self,
        invoice_id: i64,
    ) -> Result<Option<(InvoiceEntity, CustomerEntity, Vec<InvoiceItemEntity>)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = invoices::table
            .inner_join(customers::table)
            .filter(invoices::id.eq(invoice_id))
            .select((InvoiceEntity::as_select(), CustomerEntity::as_select()))
            .first::<(InvoiceEntity, CustomerEntity)>(&mut conn)
            .optional()?;

        let Some((invoice, customer)) = row else {
            return Ok(None);
        };

        let items = invoice_items::table
            .filter(invoice_items::invoice_id.eq(invoice_id))
            .select(InvoiceItemEntity::as_select())
            .order(invoice_items::id.asc())
            .load::<InvoiceItemEntity>(&mut conn)?;

        Ok(Some((invoice, customer, items)))
    }

    async fn list(
        &self,
        filter: &ListInvoicesFilter,
    ) -> Result<(Vec<(InvoiceEntity, CustomerEntity)>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut count_query = invoices::table.select(count_star()).into_boxed();
        if let Some(invoice_number) = &filter.invoice_number {
            count_query = count_query
                .filter(invoices::invoice_number.like(format!("%{}%", invoice_number)));
        }
        if let Some(customer_id) = filter.customer_id {
            count_query = count_query.filter(invoices::customer_id.eq(customer_id));
        }
        let total = count_query.first::<i64>(&mut conn)?;

        let mut query = invoices::table
            .inner_join(customers::table)
            .select((InvoiceEntity::as_select(), CustomerEntity::as_select()))
            .into_boxed();
        if let Some(invoice_number) = &filter.invoice_number {
            query = query.filter(invoices::invoice_number.like(format!("%{}%", invoice_number)));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(invoices::customer_id.eq(customer_id));
        }

        let page_query = filter.page_query();
        let rows = query
            .order(invoices::id.desc())
            .limit(page_query.per_page())
            .offset(page_query.offset())
            .load::<(InvoiceEntity, CustomerEntity)>(&mut conn)?;

        Ok((rows, total))
    }

    async fn count_items(&self, invoice_ids: Vec<i64>) -> Result<Vec<(i64, i64)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        if invoice_ids.is_empty() {
            return Ok(Vec::new());
        }

        let counts = invoice_items::table
            .filter(invoice_items::invoice_id.eq_any(&invoice_ids))
            .group_by(invoice_items::invoice_id)
            .select((invoice_items::invoice_id, count_star()))
            .load::<(i64, i64)>(&mut conn)?;

        Ok(counts)
    }

    async fn exists_by_number(&self, invoice_number: &str, except_id: Option<i64>) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = invoices::table
            .select(count_star())
            .filter(invoices::invoice_number.eq(invoice_number))
            .into_boxed();

        if let Some(except_id) = except_id {
            query = query.filter(invoices::id.ne(except_id));
        }

        let conflicts = query.first::<i64>(&mut conn)?;

        Ok(conflicts > 0)
    }

    async fn next_sequence(&self, scope: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let value = insert_into(counters::table)
            .values((counters::scope.eq(scope), counters::value.eq(1_i64)))
            .on_conflict(counters::scope)
            .do_update()
            .set(counters::value.eq(counters::value + 1))
            .returning(counters::value)
            .get_result::<i64>(&mut conn)?;

        Ok(value)
    }

    async fn delete_by_id(&self, invoice_id: i64) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Items go with their invoice, always.
        let deleted = conn.transaction::<usize, diesel::result::Error, _>(|tx| {
            delete(invoice_items::table.filter(invoice_items::invoice_id.eq(invoice_id)))
                .execute(tx)?;

            delete(invoices::table.find(invoice_id)).execute(tx)
        })?;

        Ok(deleted)
    }
}
