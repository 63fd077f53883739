use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::entities::applicants::{InsertApplicantEntity, UpdateApplicantEntity};
use crate::domain::value_objects::email::is_valid_email;
use crate::domain::value_objects::pagination::PageQuery;

pub const RESUME_FOLDER: &str = "applicants_resume";

/// Signed download links handed out on reads expire after an hour.
pub const RESUME_URL_TTL: Duration = Duration::from_secs(60 * 60);

/// Object key file name, `<phone>_<first>_<last>.pdf`.
pub fn resume_file_name(phone_number: &str, first_name: &str, last_name: &str) -> String {
    format!("{}_{}_{}.pdf", phone_number, first_name, last_name)
}

/// `resume_url` here is a signed temporary URL, never the raw object key.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApplicantModel {
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

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    pub fn validate(&self) -> Result<(), String> {
        let is_pdf = self.content_type.eq_ignore_ascii_case("application/pdf")
            || self.file_name.to_ascii_lowercase().ends_with(".pdf");

        if !is_pdf {
            return Err("The resume_file must be a file of type: pdf.".to_string());
        }
        if self.bytes.is_empty() {
            return Err("The resume_file must be a file of type: pdf.".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateApplicantModel {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub notes: Option<String>,
}

impl CreateApplicantModel {
    /// Builds the model from multipart text fields, reporting the first
    /// missing required field in declared order.
    pub fn from_form(mut fields: HashMap<String, String>) -> Result<Self, String> {
        let mut require = |name: &str| -> Result<String, String> {
            match fields.remove(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(format!("The {} field is required.", name)),
            }
        };

        Ok(Self {
            first_name: require("first_name")?,
            last_name: require("last_name")?,
            email: require("email")?,
            phone_number: require("phone_number")?,
            notes: fields.remove("notes"),
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_email(&self.email) {
            return Err("The email must be a valid email address.".to_string());
        }
        Ok(())
    }

    pub fn into_entity(self, resume_url: Option<String>) -> InsertApplicantEntity {
        InsertApplicantEntity {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            notes: self.notes,
            resume_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct UpdateApplicantModel {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub notes: Option<String>,
}

impl UpdateApplicantModel {
    pub fn from_form(mut fields: HashMap<String, String>) -> Self {
        Self {
            first_name: fields.remove("first_name"),
            last_name: fields.remove("last_name"),
            email: fields.remove("email"),
            phone_number: fields.remove("phone_number"),
            notes: fields.remove("notes"),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err("The email must be a valid email address.".to_string());
            }
        }
        Ok(())
    }

    pub fn into_changeset(self, updated_at: DateTime<Utc>) -> UpdateApplicantEntity {
        UpdateApplicantEntity {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            notes: self.notes,
            resume_url: None,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ListApplicantsFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ListApplicantsFilter {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
