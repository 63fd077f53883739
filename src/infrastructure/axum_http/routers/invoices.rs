use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::application::usercases::invoices::InvoiceUseCase;
use crate::domain::repositories::customers::CustomerRepository;
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::invoices::{
    CreateInvoiceModel, ListInvoicesFilter, UpdateInvoiceModel,
};
use crate::infrastructure::axum_http::extractors::AppJson;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::customers::CustomerPostgres;
use crate::infrastructure::postgres::repositories::invoices::InvoicePostgres;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let invoice_repository = InvoicePostgres::new(Arc::clone(&db_pool));
    let customer_repository = CustomerPostgres::new(Arc::clone(&db_pool));
    let invoice_usecase = InvoiceUseCase::new(
        Arc::new(invoice_repository),
        Arc::new(customer_repository),
    );

    Router::new()
        .route("/", post(store))
        .route("/", get(index))
        .route("/:id", get(show))
        .route("/:id", put(update))
        .route("/:id", delete(destroy))
        .with_state(Arc::new(invoice_usecase))
}

pub async fn index<I, C>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C>>>,
    Query(filter): Query<ListInvoicesFilter>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match invoice_usecase.list(filter).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn show<I, C>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C>>>,
    Path(invoice_id): Path<i64>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match invoice_usecase.show(invoice_id).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn store<I, C>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C>>>,
    AppJson(create_invoice_model): AppJson<CreateInvoiceModel>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match invoice_usecase.create(create_invoice_model).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn update<I, C>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C>>>,
    Path(invoice_id): Path<i64>,
    AppJson(update_invoice_model): AppJson<UpdateInvoiceModel>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match invoice_usecase.update(invoice_id, update_invoice_model).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Invoice updated successfully" })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn destroy<I, C>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C>>>,
    Path(invoice_id): Path<i64>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match invoice_usecase.delete(invoice_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Invoice deleted successfully" })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
