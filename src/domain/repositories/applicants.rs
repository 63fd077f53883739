use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::applicants::{
    ApplicantEntity, InsertApplicantEntity, UpdateApplicantEntity,
};
use crate::domain::value_objects::applicants::ListApplicantsFilter;

#[async_trait]
#[automock]
pub trait ApplicantRepository {
    async fn create(&self, applicant: InsertApplicantEntity) -> Result<ApplicantEntity>;

    async fn update(&self, applicant_id: i64, changes: UpdateApplicantEntity) -> Result<()>;

    async fn find_by_id(&self, applicant_id: i64) -> Result<Option<ApplicantEntity>>;

    async fn list(&self, filter: &ListApplicantsFilter) -> Result<(Vec<ApplicantEntity>, i64)>;

    async fn exists_by_email(&self, email: &str, except_id: Option<i64>) -> Result<bool>;

    async fn delete_by_id(&self, applicant_id: i64) -> Result<usize>;
}
