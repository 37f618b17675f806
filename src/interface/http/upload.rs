//! Multipart decoding for mutation endpoints that carry an optional image.
//!
//! Text parts are collected into a field map; the single `image` part is
//! checked against the upload policy as it is read, so a rejected file fails
//! the request before any record mutation happens.

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::{DateTime, NaiveDate};

use crate::domain::errors::DomainError;
use crate::infrastructure::image_store::StagedUpload;

pub struct MutationForm {
    fields: HashMap<String, String>,
    image: Option<StagedUpload>,
}

impl MutationForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, DomainError> {
        let mut fields = HashMap::new();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| DomainError::validation(format!("malformed multipart body: {err}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "image" {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|err| {
                    DomainError::validation(format!("failed to read upload: {err}"))
                })?;
                image = Some(StagedUpload::checked(
                    original_name,
                    &content_type,
                    bytes.to_vec(),
                )?);
            } else {
                let value = field.text().await.map_err(|err| {
                    DomainError::validation(format!("failed to read field '{name}': {err}"))
                })?;
                fields.insert(name, value);
            }
        }

        Ok(Self { fields, image })
    }

    pub fn take_image(&mut self) -> Option<StagedUpload> {
        self.image.take()
    }

    pub fn required(&self, key: &str) -> Result<String, DomainError> {
        self.optional(key)
            .ok_or_else(|| DomainError::validation(format!("{key} is required")))
    }

    /// Returns the trimmed field value, mapping absent and blank to `None`.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn required_date(&self, key: &str) -> Result<NaiveDate, DomainError> {
        parse_date(key, &self.required(key)?)
    }

    pub fn optional_date(&self, key: &str) -> Result<Option<NaiveDate>, DomainError> {
        self.optional(key)
            .map(|value| parse_date(key, &value))
            .transpose()
    }

    pub fn required_u32(&self, key: &str) -> Result<u32, DomainError> {
        parse_u32(key, &self.required(key)?)
    }

    pub fn optional_u32(&self, key: &str) -> Result<Option<u32>, DomainError> {
        self.optional(key)
            .map(|value| parse_u32(key, &value))
            .transpose()
    }

    #[cfg(test)]
    pub fn from_fields(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            image: None,
        }
    }
}

fn parse_date(key: &str, raw: &str) -> Result<NaiveDate, DomainError> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.date_naive());
    }
    Err(DomainError::validation(format!(
        "{key} must be a date (YYYY-MM-DD)"
    )))
}

fn parse_u32(key: &str, raw: &str) -> Result<u32, DomainError> {
    raw.parse::<u32>()
        .map_err(|_| DomainError::validation(format!("{key} must be a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_count_as_absent() {
        let form = MutationForm::from_fields(&[("title", "  "), ("category", "cultural")]);
        assert!(form.optional("title").is_none());
        assert!(form.required("title").is_err());
        assert_eq!(form.required("category").unwrap(), "cultural");
    }

    #[test]
    fn dates_parse_plain_and_rfc3339() {
        let form = MutationForm::from_fields(&[
            ("eventDate", "2025-01-01"),
            ("endDate", "2025-01-02T10:30:00Z"),
        ]);
        assert_eq!(
            form.required_date("eventDate").unwrap().to_string(),
            "2025-01-01"
        );
        assert_eq!(
            form.required_date("endDate").unwrap().to_string(),
            "2025-01-02"
        );
        assert!(form.optional_date("missing").unwrap().is_none());
    }

    #[test]
    fn slot_counts_must_be_integers() {
        let form = MutationForm::from_fields(&[("totalSlots", "100"), ("bad", "lots")]);
        assert_eq!(form.required_u32("totalSlots").unwrap(), 100);
        assert!(form.optional_u32("bad").is_err());
    }
}
