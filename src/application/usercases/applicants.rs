use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::applicants::ApplicantEntity;
use crate::domain::error::AppError;
use crate::domain::repositories::applicants::ApplicantRepository;
use crate::domain::repositories::attachments::AttachmentStore;
use crate::domain::value_objects::applicants::{
    ApplicantModel, CreateApplicantModel, ListApplicantsFilter, RESUME_FOLDER, RESUME_URL_TTL,
    ResumeUpload, UpdateApplicantModel, resume_file_name,
};
use crate::domain::value_objects::pagination::Paginated;

pub struct ApplicantUseCase<A, S>
where
    A: ApplicantRepository + Send + Sync,
    S: AttachmentStore + Send + Sync,
{
    applicant_repository: Arc<A>,
    attachment_store: Arc<S>,
}

impl<A, S> ApplicantUseCase<A, S>
where
    A: ApplicantRepository + Send + Sync,
    S: AttachmentStore + Send + Sync,
{
    pub fn new(applicant_repository: Arc<A>, attachment_store: Arc<S>) -> Self {
        Self {
            applicant_repository,
            attachment_store,
        }
    }

    pub async fn create(
        &self,
        model: CreateApplicantModel,
        resume: Option<ResumeUpload>,
    ) -> Result<ApplicantModel, AppError> {
        model.validate().map_err(AppError::UnprocessableEntity)?;
        if let Some(upload) = &resume {
            upload.validate().map_err(AppError::UnprocessableEntity)?;
        }

        if self
            .applicant_repository
            .exists_by_email(&model.email, None)
            .await?
        {
            return Err(AppError::BadRequest("Applicant already exists".to_string()));
        }

        let mut resume_key = None;
        if let Some(upload) = resume {
            let file_name =
                resume_file_name(&model.phone_number, &model.first_name, &model.last_name);
            let key = self
                .attachment_store
                .put_as(RESUME_FOLDER, upload.bytes, &file_name, &upload.content_type)
                .await
                .map_err(|err| {
                    warn!("Resume upload failed: {}", err);
                    AppError::BadRequest("Resume file could not be uploaded".to_string())
                })?;
            resume_key = Some(key);
        }

        // The blob write sits outside the row insert; compensate by hand.
        match self
            .applicant_repository
            .create(model.into_entity(resume_key.clone()))
            .await
        {
            Ok(created) => self.to_model(created).await,
            Err(err) => {
                if let Some(object_key) = resume_key {
                    self.delete_blob_best_effort(&object_key).await;
                }
                Err(err.into())
            }
        }
    }

    pub async fn update(
        &self,
        applicant_id: i64,
        model: UpdateApplicantModel,
        resume: Option<ResumeUpload>,
    ) -> Result<(), AppError> {
        model.validate().map_err(AppError::UnprocessableEntity)?;
        if let Some(upload) = &resume {
            upload.validate().map_err(AppError::UnprocessableEntity)?;
        }

        let Some(existing) = self.applicant_repository.find_by_id(applicant_id).await? else {
            return Err(AppError::NotFound("Applicant not found".to_string()));
        };

        if let Some(email) = &model.email {
            if self
                .applicant_repository
                .exists_by_email(email, Some(applicant_id))
                .await?
            {
                return Err(AppError::BadRequest("Email already in use".to_string()));
            }
        }

        let mut new_key = None;
        if let Some(upload) = resume {
            let phone_number = model
                .phone_number
                .clone()
                .unwrap_or_else(|| existing.phone_number.clone());
            let first_name = model
                .first_name
                .clone()
                .unwrap_or_else(|| existing.first_name.clone());
            let last_name = model
                .last_name
                .clone()
                .unwrap_or_else(|| existing.last_name.clone());

            let file_name = resume_file_name(&phone_number, &first_name, &last_name);
            let key = self
                .attachment_store
                .put_as(RESUME_FOLDER, upload.bytes, &file_name, &upload.content_type)
                .await
                .map_err(|err| {
                    warn!("Resume upload failed: {}", err);
                    AppError::BadRequest("Resume file could not be uploaded".to_string())
                })?;

            // Drop the replaced copy unless the new upload landed on the
            // same key.
            if let Some(old_key) = &existing.resume_url {
                if old_key != &key {
                    self.delete_blob_best_effort(old_key).await;
                }
            }

            new_key = Some(key);
        }

        let mut changes = model.into_changeset(Utc::now());
        changes.resume_url = new_key.clone();

        match self.applicant_repository.update(applicant_id, changes).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some(object_key) = new_key {
                    self.delete_blob_best_effort(&object_key).await;
                }
                Err(err.into())
            }
        }
    }

    pub async fn list(
        &self,
        filter: ListApplicantsFilter,
    ) -> Result<Paginated<ApplicantModel>, AppError> {
        let page_query = filter.page_query();
        let (rows, total) = self.applicant_repository.list(&filter).await?;

        let mut data = Vec::with_capacity(rows.len());
        for entity in rows {
            data.push(self.to_model(entity).await?);
        }

        Ok(Paginated::new(
            data,
            total,
            page_query.page(),
            page_query.per_page(),
        ))
    }

    pub async fn show(&self, applicant_id: i64) -> Result<ApplicantModel, AppError> {
        let Some(applicant) = self.applicant_repository.find_by_id(applicant_id).await? else {
            return Err(AppError::NotFound("Applicant not found".to_string()));
        };

        self.to_model(applicant).await
    }

    pub async fn delete(&self, applicant_id: i64) -> Result<(), AppError> {
        let Some(existing) = self.applicant_repository.find_by_id(applicant_id).await? else {
            return Err(AppError::NotFound("Applicant not found".to_string()));
        };

        let deleted = self.applicant_repository.delete_by_id(applicant_id).await?;
        if deleted == 0 {
            return Err(AppError::BadRequest(
                "Applicant could not be deleted".to_string(),
            ));
        }

        if let Some(object_key) = &existing.resume_url {
            self.delete_blob_best_effort(object_key).await;
        }

        Ok(())
    }

    /// Object keys never leave the service; reads carry a signed URL instead.
    async fn to_model(&self, entity: ApplicantEntity) -> Result<ApplicantModel, AppError> {
        let resume_url = match &entity.resume_url {
            Some(object_key) => Some(
                self.attachment_store
                    .temporary_url(object_key, RESUME_URL_TTL)
                    .await?,
            ),
            None => None,
        };

        Ok(ApplicantModel {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone_number: entity.phone_number,
            notes: entity.notes,
            resume_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    async fn delete_blob_best_effort(&self, object_key: &str) {
        if let Err(err) = self.attachment_store.delete(object_key).await {
            warn!("Failed to delete resume object {}: {}", object_key, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    use crate::domain::repositories::applicants::MockApplicantRepository;
    use crate::domain::repositories::attachments::MockAttachmentStore;

    fn sample_applicant(id: i64, resume_url: Option<&str>) -> ApplicantEntity {
        let now = Utc::now();
        ApplicantEntity {
            id,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "0812345678".to_string(),
            notes: None,
            resume_url: resume_url.map(ToString::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    fn create_model() -> CreateApplicantModel {
        CreateApplicantModel {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "0812345678".to_string(),
            notes: None,
        }
    }

    fn pdf_upload() -> ResumeUpload {
        ResumeUpload {
            file_name: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![b'%', b'P', b'D', b'F'],
        }
    }

    #[tokio::test]
    async fn create_deletes_uploaded_blob_when_insert_fails() {
        let mut repo = MockApplicantRepository::new();
        let mut store = MockAttachmentStore::new();

        repo.expect_exists_by_email()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        store
            .expect_put_as()
            .withf(|folder, _bytes, file_name, content_type| {
                folder == RESUME_FOLDER
                    && file_name == "0812345678_Jane_Doe.pdf"
                    && content_type == "application/pdf"
            })
            .returning(|_, _, _, _| {
                Box::pin(async { Ok("applicants_resume/0812345678_Jane_Doe.pdf".to_string()) })
            });

        repo.expect_create()
            .returning(|_| Box::pin(async { Err(anyhow!("connection reset")) }));

        store
            .expect_delete()
            .withf(|object_key| object_key == "applicants_resume/0812345678_Jane_Doe.pdf")
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let err = ApplicantUseCase::new(Arc::new(repo), Arc::new(store))
            .create(create_model(), Some(pdf_upload()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn create_without_resume_never_touches_storage() {
        let mut repo = MockApplicantRepository::new();
        let store = MockAttachmentStore::new();

        repo.expect_exists_by_email()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        repo.expect_create()
            .withf(|entity| entity.resume_url.is_none())
            .returning(|_| Box::pin(async { Ok(sample_applicant(1, None)) }));

        let applicant = ApplicantUseCase::new(Arc::new(repo), Arc::new(store))
            .create(create_model(), None)
            .await
            .unwrap();

        assert_eq!(applicant.resume_url, None);
    }

    #[tokio::test]
    async fn create_rejects_non_pdf_resume() {
        let repo = MockApplicantRepository::new();
        let store = MockAttachmentStore::new();

        let upload = ResumeUpload {
            file_name: "resume.docx".to_string(),
            content_type: "application/msword".to_string(),
            bytes: vec![1],
        };

        let err = ApplicantUseCase::new(Arc::new(repo), Arc::new(store))
            .create(create_model(), Some(upload))
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::UnprocessableEntity(ref msg) if msg == "The resume_file must be a file of type: pdf.")
        );
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let mut repo = MockApplicantRepository::new();
        let store = MockAttachmentStore::new();

        repo.expect_exists_by_email()
            .withf(|email, except_id| email == "jane@example.com" && except_id.is_none())
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let err = ApplicantUseCase::new(Arc::new(repo), Arc::new(store))
            .create(create_model(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Applicant already exists"));
    }

    #[tokio::test]
    async fn show_swaps_object_key_for_temporary_url() {
        let mut repo = MockApplicantRepository::new();
        let mut store = MockAttachmentStore::new();

        repo.expect_find_by_id().returning(|id| {
            Box::pin(async move { Ok(Some(sample_applicant(id, Some("applicants_resume/a.pdf")))) })
        });

        store
            .expect_temporary_url()
            .withf(|object_key, expires_in| {
                object_key == "applicants_resume/a.pdf" && *expires_in == RESUME_URL_TTL
            })
            .returning(|_, _| {
                Box::pin(async { Ok("https://storage.example.com/signed/a.pdf".to_string()) })
            });

        let applicant = ApplicantUseCase::new(Arc::new(repo), Arc::new(store))
            .show(3)
            .await
            .unwrap();

        assert_eq!(
            applicant.resume_url.as_deref(),
            Some("https://storage.example.com/signed/a.pdf")
        );
    }

    #[tokio::test]
    async fn update_replaces_resume_and_deletes_old_copy() {
        let mut repo = MockApplicantRepository::new();
        let mut store = MockAttachmentStore::new();

        repo.expect_find_by_id().returning(|id| {
            Box::pin(async move {
                Ok(Some(sample_applicant(id, Some("applicants_resume/old.pdf"))))
            })
        });

        store
            .expect_put_as()
            .returning(|_, _, _, _| {
                Box::pin(async { Ok("applicants_resume/0899999999_Jane_Doe.pdf".to_string()) })
            });

        store
            .expect_delete()
            .withf(|object_key| object_key == "applicants_resume/old.pdf")
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        repo.expect_update()
            .withf(|applicant_id, changes| {
                *applicant_id == 7
                    && changes.resume_url.as_deref()
                        == Some("applicants_resume/0899999999_Jane_Doe.pdf")
            })
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let model = UpdateApplicantModel {
            phone_number: Some("0899999999".to_string()),
            ..UpdateApplicantModel::default()
        };

        ApplicantUseCase::new(Arc::new(repo), Arc::new(store))
            .update(7, model, Some(pdf_upload()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_removes_row_then_blob() {
        let mut repo = MockApplicantRepository::new();
        let mut store = MockAttachmentStore::new();

        repo.expect_find_by_id().returning(|id| {
            Box::pin(async move { Ok(Some(sample_applicant(id, Some("applicants_resume/a.pdf")))) })
        });

        repo.expect_delete_by_id()
            .returning(|_| Box::pin(async { Ok(1) }));

        store
            .expect_delete()
            .withf(|object_key| object_key == "applicants_resume/a.pdf")
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        ApplicantUseCase::new(Arc::new(repo), Arc::new(store))
            .delete(4)
            .await
            .unwrap();
    }
}
