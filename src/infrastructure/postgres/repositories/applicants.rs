use anyhow::Result;
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::{OptionalExtension, RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::domain::entities::applicants::{
    ApplicantEntity, InsertApplicantEntity, UpdateApplicantEntity,
};
use crate::domain::repositories::applicants::ApplicantRepository;
use crate::domain::value_objects::applicants::ListApplicantsFilter;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::applicants;

pub struct ApplicantPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ApplicantPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ApplicantRepository for ApplicantPostgres {
    async fn create(&self, applicant: InsertApplicantEntity) -> Result<ApplicantEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let created = insert_into(applicants::table)
            .values(&applicant)
            .returning(ApplicantEntity::as_returning())
            .get_result::<ApplicantEntity>(&mut conn)?;

        Ok(created)
    }

    async fn update(&self, applicant_id: i64, changes: UpdateApplicantEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(applicants::table.find(applicant_id))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn find_by_id(&self, applicant_id: i64) -> Result<Option<ApplicantEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let applicant = applicants::table
            .find(applicant_id)
            .select(ApplicantEntity::as_select())
            .first::<ApplicantEntity>(&mut conn)
            .optional()?;

        Ok(applicant)
    }

    async fn list(&self, filter: &ListApplicantsFilter) -> Result<(Vec<ApplicantEntity>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut count_query = applicants::table.select(count_star()).into_boxed();
        if let Some(first_name) = &filter.first_name {
            count_query =
                count_query.filter(applicants::first_name.like(format!("%{}%", first_name)));
        }
        if let Some(last_name) = &filter.last_name {
            count_query =
                count_query.filter(applicants::last_name.like(format!("%{}%", last_name)));
        }
        if let Some(email) = &filter.email {
            count_query = count_query.filter(applicants::email.like(format!("%{}%", email)));
        }
        if let Some(phone_number) = &filter.phone_number {
            count_query =
                count_query.filter(applicants::phone_number.like(format!("%{}%", phone_number)));
        }
        let total = count_query.first::<i64>(&mut conn)?;

        let mut query = applicants::table
            .select(ApplicantEntity::as_select())
            .into_boxed();
        if let Some(first_name) = &filter.first_name {
            query = query.filter(applicants::first_name.like(format!("%{}%", first_name)));
        }
        if let Some(last_name) = &filter.last_name {
            query = query.filter(applicants::last_name.like(format!("%{}%", last_name)));
        }
        if let Some(email) = &filter.email {
            query = query.filter(applicants::email.like(format!("%{}%", email)));
        }
        if let Some(phone_number) = &filter.phone_number {
            query = query.filter(applicants::phone_number.like(format!("%{}%", phone_number)));
        }

        let page_query = filter.page_query();
        let rows = query
            .order(applicants::id.desc())
            .limit(page_query.per_page())
            .offset(page_query.offset())
            .load::<ApplicantEntity>(&mut conn)?;

        Ok((rows, total))
    }

    async fn exists_by_email(&self, email: &str, except_id: Option<i64>) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = applicants::table
            .select(count_star())
            .filter(applicants::email.eq(email))
            .into_boxed();

        if let Some(except_id) = except_id {
            query = query.filter(applicants::id.ne(except_id));
        }

        let conflicts = query.first::<i64>(&mut conn)?;

        Ok(conflicts > 0)
    }

    async fn delete_by_id(&self, applicant_id: i64) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(applicants::table.find(applicant_id)).execute(&mut conn)?;

        Ok(deleted)
    }
}
