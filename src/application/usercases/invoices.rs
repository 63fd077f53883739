use bigdecimal::BigDecimal;
use chrono::{Datelike, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::invoices::{
    InsertInvoiceEntity, InsertInvoiceItemEntity, UpdateInvoiceEntity,
};
use crate::domain::error::AppError;
use crate::domain::repositories::customers::CustomerRepository;
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::customers::{CustomerModel, CustomerSummaryModel};
use crate::domain::value_objects::enums::entity_statuses::EntityStatus;
use crate::domain::value_objects::invoices::{
    CreateInvoiceItemModel, CreateInvoiceModel, InvoiceDetailModel, InvoiceItemModel,
    InvoiceListItemModel, InvoiceModel, ListInvoicesFilter, UpdateInvoiceModel,
    format_invoice_number, invoice_sequence_scope,
};
use crate::domain::value_objects::pagination::Paginated;

pub struct InvoiceUseCase<I, C>
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    invoice_repository: Arc<I>,
    customer_repository: Arc<C>,
}

impl<I, C> InvoiceUseCase<I, C>
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    pub fn new(invoice_repository: Arc<I>, customer_repository: Arc<C>) -> Self {
        Self {
            invoice_repository,
            customer_repository,
        }
    }

    pub async fn create(&self, model: CreateInvoiceModel) -> Result<InvoiceModel, AppError> {
        model.validate().map_err(AppError::UnprocessableEntity)?;

        if self
            .customer_repository
            .find_by_id(model.customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::UnprocessableEntity(
                "The selected customer_id is invalid.".to_string(),
            ));
        }

        let invoice_number = match &model.invoice_number {
            Some(invoice_number) => {
                if self
                    .invoice_repository
                    .exists_by_number(invoice_number, None)
                    .await?
                {
                    return Err(AppError::BadRequest(
                        "Invoice number already exists".to_string(),
                    ));
                }
                invoice_number.clone()
            }
            None => {
                let year = Utc::now().year();
                let sequence = self
                    .invoice_repository
                    .next_sequence(&invoice_sequence_scope(year))
                    .await?;
                format_invoice_number(year, sequence)
            }
        };

        let items = build_insert_items(model.invoice_items.as_deref().unwrap_or_default());

        // A caller-supplied total wins; otherwise derive it from the
        // submitted item set.
        let total = match (&model.total, &model.invoice_items) {
            (Some(total), _) => Some(total.clone()),
            (None, Some(_)) => Some(sum_item_totals(&items)),
            (None, None) => None,
        };

        let insert_entity = InsertInvoiceEntity {
            customer_id: model.customer_id,
            invoice_number,
            issue_date: model.issue_date,
            due_date: model.due_date,
            description: model.description,
            exchange_rate: model.exchange_rate,
            sub_total: model.sub_total,
            tax: model.tax,
            total,
            paid: model.paid,
            balance: model.balance,
            status: model.status.unwrap_or_default().as_bool(),
        };

        let created = self
            .invoice_repository
            .create_with_items(insert_entity, items)
            .await?;

        Ok(InvoiceModel::from(created))
    }

    pub async fn update(
        &self,
        invoice_id: i64,
        model: UpdateInvoiceModel,
    ) -> Result<(), AppError> {
        model.validate().map_err(AppError::UnprocessableEntity)?;

        if self
            .invoice_repository
            .find_by_id(invoice_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Invoice not found".to_string()));
        }

        if let Some(customer_id) = model.customer_id {
            if self
                .customer_repository
                .find_by_id(customer_id)
                .await?
                .is_none()
            {
                return Err(AppError::UnprocessableEntity(
                    "The selected customer_id is invalid.".to_string(),
                ));
            }
        }

        if let Some(invoice_number) = &model.invoice_number {
            if self
                .invoice_repository
                .exists_by_number(invoice_number, Some(invoice_id))
                .await?
            {
                return Err(AppError::BadRequest(
                    "Invoice number already exists".to_string(),
                ));
            }
        }

        let items = build_insert_items(model.invoice_items.as_deref().unwrap_or_default());

        let total = match (&model.total, &model.invoice_items) {
            (Some(total), _) => Some(total.clone()),
            (None, Some(_)) => Some(sum_item_totals(&items)),
            (None, None) => None,
        };

        let changes = UpdateInvoiceEntity {
            customer_id: model.customer_id,
            invoice_number: model.invoice_number,
            issue_date: model.issue_date,
            due_date: model.due_date,
            description: model.description,
            exchange_rate: model.exchange_rate,
            sub_total: model.sub_total,
            tax: model.tax,
            total,
            paid: model.paid,
            balance: model.balance,
            status: model.status.map(EntityStatus::as_bool),
            updated_at: Utc::now(),
        };

        self.invoice_repository
            .update_with_items(invoice_id, changes, items)
            .await?;

        Ok(())
    }

    pub async fn list(
        &self,
        filter: ListInvoicesFilter,
    ) -> Result<Paginated<InvoiceListItemModel>, AppError> {
        let page_query = filter.page_query();
        let (rows, total) = self.invoice_repository.list(&filter).await?;

        let invoice_ids: Vec<i64> = rows.iter().map(|(invoice, _)| invoice.id).collect();
        let item_counts: HashMap<i64, i64> = self
            .invoice_repository
            .count_items(invoice_ids)
            .await?
            .into_iter()
            .collect();

        let data = rows
            .into_iter()
            .map(|(invoice, customer)| InvoiceListItemModel {
                total_items: item_counts.get(&invoice.id).copied().unwrap_or(0),
                customer: CustomerSummaryModel::from(customer),
                invoice: InvoiceModel::from(invoice),
            })
            .collect();

        Ok(Paginated::new(
            data,
            total,
            page_query.page(),
            page_query.per_page(),
        ))
    }

    pub async fn show(&self, invoice_id: i64) -> Result<InvoiceDetailModel, AppError> {
        let Some((invoice, customer, items)) =
            self.invoice_repository.find_detail(invoice_id).await?
        else {
            return Err(AppError::NotFound("Invoice not found".to_string()));
        };

        Ok(InvoiceDetailModel {
            invoice: InvoiceModel::from(invoice),
            customer: CustomerModel::from(customer),
            invoice_items: items.into_iter().map(InvoiceItemModel::from).collect(),
        })
    }

    pub async fn delete(&self, invoice_id: i64) -> Result<(), AppError> {
        if self
            .invoice_repository
            .find_by_id(invoice_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Invoice not found".to_string()));
        }

        let deleted = self.invoice_repository.delete_by_id(invoice_id).await?;
        if deleted == 0 {
            return Err(AppError::BadRequest("Invoice not deleted".to_string()));
        }

        Ok(())
    }
}

fn build_insert_items(items: &[CreateInvoiceItemModel]) -> Vec<InsertInvoiceItemEntity> {
    items
        .iter()
        .map(|item| InsertInvoiceItemEntity {
            invoice_id: None,
            item_name: item.item_name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price.clone(),
            total: item.computed_total(),
        })
        .collect()
}

fn sum_item_totals(items: &[InsertInvoiceItemEntity]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::from(0), |acc, item| acc + &item.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::entities::customers::CustomerEntity;
    use crate::domain::entities::invoices::{InvoiceEntity, InvoiceItemEntity};
    use crate::domain::repositories::customers::MockCustomerRepository;
    use crate::domain::repositories::invoices::MockInvoiceRepository;

    fn sample_customer(id: i64) -> CustomerEntity {
        let now = Utc::now();
        CustomerEntity {
            id,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone_number: "0812345678".to_string(),
            address: None,
            vat_number: None,
            status: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_invoice(id: i64, invoice_number: &str, total: Option<i64>) -> InvoiceEntity {
        let now = Utc::now();
        InvoiceEntity {
            id,
            customer_id: 1,
            invoice_number: invoice_number.to_string(),
            issue_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            description: None,
            exchange_rate: None,
            sub_total: None,
            tax: None,
            total: total.map(BigDecimal::from),
            paid: None,
            balance: None,
            status: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_item(id: i64, invoice_id: i64, name: &str, quantity: i32) -> InvoiceItemEntity {
        let now = Utc::now();
        InvoiceItemEntity {
            id,
            invoice_id,
            item_name: name.to_string(),
            quantity,
            unit_price: BigDecimal::from(50),
            total: BigDecimal::from(50) * BigDecimal::from(quantity),
            created_at: now,
            updated_at: now,
        }
    }

    fn create_model(items: Option<Vec<CreateInvoiceItemModel>>) -> CreateInvoiceModel {
        CreateInvoiceModel {
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
            invoice_items: items,
        }
    }

    fn item_model(name: &str, quantity: i32, unit_price: i64) -> CreateInvoiceItemModel {
        CreateInvoiceItemModel {
            item_name: name.to_string(),
            quantity,
            unit_price: BigDecimal::from(unit_price),
            total: None,
        }
    }

    #[tokio::test]
    async fn create_persists_items_with_computed_totals() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let mut customer_repo = MockCustomerRepository::new();

        customer_repo
            .expect_find_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(sample_customer(id))) }));

        let year = Utc::now().year();
        let expected_scope = invoice_sequence_scope(year);
        invoice_repo
            .expect_next_sequence()
            .withf(move |scope| scope == expected_scope)
            .returning(|_| Box::pin(async { Ok(7) }));

        let expected_number = format_invoice_number(year, 7);
        let returned_number = expected_number.clone();
        invoice_repo
            .expect_create_with_items()
            .withf(move |invoice, items| {
                invoice.invoice_number == expected_number
                    && invoice.total == Some(BigDecimal::from(120))
                    && items.len() == 2
                    && items[0].total == BigDecimal::from(100)
                    && items[1].total == BigDecimal::from(20)
                    && items.iter().all(|item| item.invoice_id.is_none())
            })
            .returning(move |_, _| {
                let invoice = sample_invoice(10, &returned_number, Some(120));
                Box::pin(async move { Ok(invoice) })
            });

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo));
        let model = create_model(Some(vec![item_model("A", 2, 50), item_model("B", 1, 20)]));

        let created = usecase.create(model).await.unwrap();
        assert_eq!(created.total, Some(BigDecimal::from(120)));
    }

    #[tokio::test]
    async fn create_ignores_caller_item_totals_but_respects_invoice_total() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let mut customer_repo = MockCustomerRepository::new();

        customer_repo
            .expect_find_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(sample_customer(id))) }));

        invoice_repo
            .expect_next_sequence()
            .returning(|_| Box::pin(async { Ok(1) }));

        invoice_repo
            .expect_create_with_items()
            .withf(|invoice, items| {
                invoice.total == Some(BigDecimal::from(500))
                    && items[0].total == BigDecimal::from(100)
            })
            .returning(|invoice, _| {
                let created = sample_invoice(11, &invoice.invoice_number, Some(500));
                Box::pin(async move { Ok(created) })
            });

        let mut tampered = item_model("A", 2, 50);
        tampered.total = Some(BigDecimal::from(999_999));

        let mut model = create_model(Some(vec![tampered]));
        model.total = Some(BigDecimal::from(500));

        let created = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .create(model)
            .await
            .unwrap();
        assert_eq!(created.total, Some(BigDecimal::from(500)));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_invoice_number() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let mut customer_repo = MockCustomerRepository::new();

        customer_repo
            .expect_find_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(sample_customer(id))) }));

        invoice_repo
            .expect_exists_by_number()
            .withf(|number, except_id| number == "INV2026-0001" && except_id.is_none())
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let mut model = create_model(None);
        model.invoice_number = Some("INV2026-0001".to_string());

        let err = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .create(model)
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::BadRequest(ref msg) if msg == "Invoice number already exists")
        );
    }

    #[tokio::test]
    async fn create_rejects_unknown_customer() {
        let invoice_repo = MockInvoiceRepository::new();
        let mut customer_repo = MockCustomerRepository::new();

        customer_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .create(create_model(None))
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::UnprocessableEntity(ref msg) if msg == "The selected customer_id is invalid.")
        );
    }

    #[tokio::test]
    async fn create_rejects_invalid_item_before_any_store_access() {
        let invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        let model = create_model(Some(vec![item_model("A", -1, 50)]));

        let err = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .create(model)
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::UnprocessableEntity(ref msg) if msg == "The quantity must be at least 0.")
        );
    }

    #[tokio::test]
    async fn update_missing_invoice_returns_not_found() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        invoice_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .update(5, UpdateInvoiceModel::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Invoice not found"));
    }

    #[tokio::test]
    async fn update_rejects_number_already_used_by_another_invoice() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        invoice_repo
            .expect_find_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(sample_invoice(id, "INV2026-0005", None))) }));

        invoice_repo
            .expect_exists_by_number()
            .withf(|number, except_id| number == "INV2026-0009" && *except_id == Some(5))
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let model = UpdateInvoiceModel {
            invoice_number: Some("INV2026-0009".to_string()),
            ..UpdateInvoiceModel::default()
        };

        let err = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .update(5, model)
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::BadRequest(ref msg) if msg == "Invoice number already exists")
        );
    }

    #[tokio::test]
    async fn update_replaces_item_set_and_recomputes_total() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        invoice_repo
            .expect_find_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(sample_invoice(id, "INV2026-0005", None))) }));

        invoice_repo
            .expect_update_with_items()
            .withf(|invoice_id, changes, items| {
                *invoice_id == 5
                    && changes.total == Some(BigDecimal::from(120))
                    && items.len() == 2
            })
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let model = UpdateInvoiceModel {
            invoice_items: Some(vec![item_model("A", 2, 50), item_model("B", 1, 20)]),
            ..UpdateInvoiceModel::default()
        };

        InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .update(5, model)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_with_invalid_item_never_reaches_the_store() {
        let invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        let model = UpdateInvoiceModel {
            invoice_items: Some(vec![item_model("", 1, 10)]),
            ..UpdateInvoiceModel::default()
        };

        let err = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .update(5, model)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn show_loads_customer_and_items() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        invoice_repo.expect_find_detail().returning(|id| {
            let detail = (
                sample_invoice(id, "INV2026-0001", Some(150)),
                sample_customer(1),
                vec![sample_item(1, id, "A", 2), sample_item(2, id, "B", 1)],
            );
            Box::pin(async move { Ok(Some(detail)) })
        });

        let detail = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .show(9)
            .await
            .unwrap();

        assert_eq!(detail.customer.id, 1);
        assert_eq!(detail.invoice_items.len(), 2);
        assert_eq!(detail.invoice_items[0].total, BigDecimal::from(100));
    }

    #[tokio::test]
    async fn show_missing_returns_not_found() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        invoice_repo
            .expect_find_detail()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .show(9)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_returns_not_found() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        invoice_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .delete(9)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_merges_item_counts_into_page() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let customer_repo = MockCustomerRepository::new();

        invoice_repo.expect_list().returning(|_| {
            let rows = vec![
                (sample_invoice(1, "INV2026-0001", Some(120)), sample_customer(1)),
                (sample_invoice(2, "INV2026-0002", None), sample_customer(1)),
            ];
            Box::pin(async move { Ok((rows, 2)) })
        });

        invoice_repo
            .expect_count_items()
            .withf(|invoice_ids| invoice_ids == &[1, 2])
            .returning(|_| Box::pin(async { Ok(vec![(1, 3)]) }));

        let page = InvoiceUseCase::new(Arc::new(invoice_repo), Arc::new(customer_repo))
            .list(ListInvoicesFilter::default())
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 20);
        assert_eq!(page.data[0].total_items, 3);
        assert_eq!(page.data[1].total_items, 0);
        assert_eq!(page.data[0].customer.first_name, "Jane");
    }
}
