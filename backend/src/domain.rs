use chrono::{DateTime, NaiveDate};
use thiserror::Error;
use tracing::info;

use crate::db::DbConnection;
use shared::{
    CreateVaccinationRequest, DeleteVaccinationRequest, UpdateVaccinationRequest, Vaccination,
};

/// Failures surfaced by the vaccination service, in the order they are
/// checked: validation runs before any store call.
#[derive(Debug, Error)]
pub enum VaccinationError {
    #[error("{0}")]
    Validation(String),
    #[error("vaccination {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}

fn validation(message: &str) -> VaccinationError {
    VaccinationError::Validation(message.to_string())
}

/// Accept `YYYY-MM-DD` or a full RFC 3339 timestamp (date part taken).
fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate, VaccinationError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    Err(VaccinationError::Validation(format!(
        "{field} must be an ISO 8601 date"
    )))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Orchestrates validation and store access for the vaccination records
#[derive(Clone)]
pub struct VaccinationService {
    db: DbConnection,
}

impl VaccinationService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List all records, ordered by due date ascending
    pub async fn list_vaccinations(&self) -> Result<Vec<Vaccination>, VaccinationError> {
        info!("Listing vaccinations");
        Ok(self.db.list_vaccinations().await?)
    }

    /// Create a record from the add form. `lastCompleted` starts absent.
    pub async fn create_vaccination(
        &self,
        request: CreateVaccinationRequest,
    ) -> Result<Vaccination, VaccinationError> {
        let (Some(name), Some(due_date)) = (present(&request.name), present(&request.due_date))
        else {
            return Err(validation("Name and dueDate are required"));
        };
        let due_date = parse_iso_date("dueDate", due_date)?;

        info!("Creating vaccination {:?} due {}", name, due_date);
        Ok(self.db.create_vaccination(name, due_date).await?)
    }

    /// Record a completion: the caller supplies both the completion date and
    /// the already-advanced next due date.
    pub async fn mark_complete(
        &self,
        request: UpdateVaccinationRequest,
    ) -> Result<Vaccination, VaccinationError> {
        let (Some(id), Some(last_completed), Some(due_date)) = (
            present(&request.id),
            present(&request.last_completed),
            present(&request.due_date),
        ) else {
            return Err(validation("id, lastCompleted, and dueDate are required"));
        };
        let last_completed = parse_iso_date("lastCompleted", last_completed)?;
        let due_date = parse_iso_date("dueDate", due_date)?;

        info!("Marking vaccination {} complete on {}", id, last_completed);
        let updated = self
            .db
            .update_vaccination_dates(id, last_completed, due_date)
            .await?;
        if !updated {
            return Err(VaccinationError::NotFound(id.to_string()));
        }

        self.db
            .get_vaccination(id)
            .await?
            .ok_or_else(|| VaccinationError::NotFound(id.to_string()))
    }

    /// Delete a record by id
    pub async fn delete_vaccination(
        &self,
        request: DeleteVaccinationRequest,
    ) -> Result<(), VaccinationError> {
        let Some(id) = present(&request.id) else {
            return Err(validation("id is required"));
        };

        info!("Deleting vaccination {}", id);
        let deleted = self.db.delete_vaccination(id).await?;
        if !deleted {
            return Err(VaccinationError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
