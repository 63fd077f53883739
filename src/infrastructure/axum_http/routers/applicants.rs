use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;

use crate::application::usercases::applicants::ApplicantUseCase;
use crate::domain::error::AppError;
use crate::domain::repositories::applicants::ApplicantRepository;
use crate::domain::repositories::attachments::AttachmentStore;
use crate::domain::value_objects::applicants::{
    CreateApplicantModel, ListApplicantsFilter, ResumeUpload, UpdateApplicantModel,
};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::applicants::ApplicantPostgres;
use crate::infrastructure::storages::s3::S3AttachmentStore;

pub fn routes(db_pool: Arc<PgPoolSquad>, attachment_store: Arc<S3AttachmentStore>) -> Router {
    let applicant_repository = ApplicantPostgres::new(Arc::clone(&db_pool));
    let applicant_usecase = ApplicantUseCase::new(Arc::new(applicant_repository), attachment_store);

    Router::new()
        .route("/", post(store))
        .route("/", get(index))
        .route("/:id", get(show))
        // updates arrive as multipart too, hence POST rather than PUT
        .route("/:id", post(update))
        .route("/:id", delete(destroy))
        .with_state(Arc::new(applicant_usecase))
}

pub async fn index<A, S>(
    State(applicant_usecase): State<Arc<ApplicantUseCase<A, S>>>,
    Query(filter): Query<ListApplicantsFilter>,
) -> impl IntoResponse
where
    A: ApplicantRepository + Send + Sync,
    S: AttachmentStore + Send + Sync,
{
    match applicant_usecase.list(filter).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn show<A, S>(
    State(applicant_usecase): State<Arc<ApplicantUseCase<A, S>>>,
    Path(applicant_id): Path<i64>,
) -> impl IntoResponse
where
    A: ApplicantRepository + Send + Sync,
    S: AttachmentStore + Send + Sync,
{
    match applicant_usecase.show(applicant_id).await {
        Ok(applicant) => (StatusCode::OK, Json(applicant)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn store<A, S>(
    State(applicant_usecase): State<Arc<ApplicantUseCase<A, S>>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    A: ApplicantRepository + Send + Sync,
    S: AttachmentStore + Send + Sync,
{
    let (fields, resume) = match read_form(multipart).await {
        Ok(parts) => parts,
        Err(error) => return error.into_response(),
    };

    let model = match CreateApplicantModel::from_form(fields) {
        Ok(model) => model,
        Err(message) => return AppError::UnprocessableEntity(message).into_response(),
    };

    match applicant_usecase.create(model, resume).await {
        Ok(applicant) => (StatusCode::OK, Json(applicant)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn update<A, S>(
    State(applicant_usecase): State<Arc<ApplicantUseCase<A, S>>>,
    Path(applicant_id): Path<i64>,
    multipart: Multipart,
) -> impl IntoResponse
where
    A: ApplicantRepository + Send + Sync,
    S: AttachmentStore + Send + Sync,
{
    let (fields, resume) = match read_form(multipart).await {
        Ok(parts) => parts,
        Err(error) => return error.into_response(),
    };

    let model = UpdateApplicantModel::from_form(fields);

    match applicant_usecase.update(applicant_id, model, resume).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Applicant updated" })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn destroy<A, S>(
    State(applicant_usecase): State<Arc<ApplicantUseCase<A, S>>>,
    Path(applicant_id): Path<i64>,
) -> impl IntoResponse
where
    A: ApplicantRepository + Send + Sync,
    S: AttachmentStore + Send + Sync,
{
    match applicant_usecase.delete(applicant_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Applicant deleted" })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

async fn read_form(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<ResumeUpload>), AppError> {
    let mut fields = HashMap::new();
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::UnprocessableEntity(err.to_string()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if name == "resume_file" {
            let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| AppError::UnprocessableEntity(err.to_string()))?
                .to_vec();

            resume = Some(ResumeUpload {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|err| AppError::UnprocessableEntity(err.to_string()))?;
            fields.insert(name, value);
        }
    }

    Ok((fields, resume))
}
