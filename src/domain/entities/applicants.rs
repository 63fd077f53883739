use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::applicants;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = applicants)]
pub struct ApplicantEntity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applicants)]
pub struct InsertApplicantEntity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = applicants)]
pub struct UpdateApplicantEntity {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}
