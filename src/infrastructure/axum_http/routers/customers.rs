use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::application::usercases::customers::CustomerUseCase;
use crate::domain::repositories::customers::CustomerRepository;
use crate::domain::value_objects::customers::{
    CreateCustomerModel, ListCustomersFilter, UpdateCustomerModel,
};
use crate::infrastructure::axum_http::extractors::AppJson;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::customers::CustomerPostgres;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let customer_repository = CustomerPostgres::new(Arc::clone(&db_pool));
    let customer_usecase = CustomerUseCase::new(Arc::new(customer_repository));

    Router::new()
        .route("/", post(store))
        .route("/", get(index))
        .route("/:id", get(show))
        .route("/:id", put(update))
        .route("/:id", delete(destroy))
        .with_state(Arc::new(customer_usecase))
}

pub async fn index<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    Query(filter): Query<ListCustomersFilter>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.list(filter).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn show<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.show(customer_id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn store<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    AppJson(create_customer_model): AppJson<CreateCustomerModel>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.create(create_customer_model).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn update<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    Path(customer_id): Path<i64>,
    AppJson(update_customer_model): AppJson<UpdateCustomerModel>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.update(customer_id, update_customer_model).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Customer updated successfully" })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn destroy<C>(
    State(customer_usecase): State<Arc<CustomerUseCase<C>>>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
{
    match customer_usecase.delete(customer_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Customer deleted" })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
