//! Academic year repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::academic_years;

/// Error types for academic year operations.
#[derive(Debug, thiserror::Error)]
pub enum AcademicYearError {
    /// Academic year not found.
    #[error("Academic year not found: {0}")]
    NotFound(Uuid),

    /// An academic year with this name already exists.
    #[error("Academic year name already exists: {0}")]
    DuplicateName(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an academic year.
#[derive(Debug, Clone)]
pub struct CreateAcademicYearInput {
    /// Display name, e.g. "2025-2026".
    pub name: String,
    /// First day of the year.
    pub start_date: NaiveDate,
    /// Last day of the year.
    pub end_date: NaiveDate,
    /// Whether the year is the active one.
    pub is_active: bool,
}

/// Academic year repository for reference-data operations.
#[derive(Debug, Clone)]
pub struct AcademicYearRepository {
    db: DatabaseConnection,
}

impl AcademicYearRepository {
    /// Creates a new academic year repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an academic year.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the database operation
    /// fails.
    pub async fn create(
        &self,
        input: CreateAcademicYearInput,
    ) -> Result<academic_years::Model, AcademicYearError> {
        let existing = academic_years::Entity::find()
            .filter(academic_years::Column::Name.eq(&input.name))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AcademicYearError::DuplicateName(input.name));
        }

        let now = Utc::now().into();
        let active = academic_years::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Gets an academic year by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<academic_years::Model, AcademicYearError> {
        academic_years::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AcademicYearError::NotFound(id))
    }

    /// Lists academic years, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<academic_years::Model>, AcademicYearError> {
        Ok(academic_years::Entity::find()
            .order_by_desc(academic_years::Column::StartDate)
            .all(&self.db)
            .await?)
    }

    /// Returns the active academic year, if one is flagged.
    ///
    /// Nothing prevents several years from being flagged active; the
    /// most recent one wins here.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(&self) -> Result<Option<academic_years::Model>, AcademicYearError> {
        Ok(academic_years::Entity::find()
            .filter(academic_years::Column::IsActive.eq(true))
            .order_by_desc(academic_years::Column::StartDate)
            .one(&self.db)
            .await?)
    }
}
