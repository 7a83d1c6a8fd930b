//! Subject repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::subjects;

/// Error types for subject operations.
#[derive(Debug, thiserror::Error)]
pub enum SubjectError {
    /// Subject not found.
    #[error("Subject not found: {0}")]
    NotFound(Uuid),

    /// A subject with this code already exists.
    #[error("Subject code already exists: {0}")]
    DuplicateCode(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a subject.
#[derive(Debug, Clone)]
pub struct CreateSubjectInput {
    /// Subject name.
    pub name: String,
    /// Unique subject code.
    pub code: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Subject repository for reference-data operations.
#[derive(Debug, Clone)]
pub struct SubjectRepository {
    db: DatabaseConnection,
}

impl SubjectRepository {
    /// Creates a new subject repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or the database operation
    /// fails.
    pub async fn create(&self, input: CreateSubjectInput) -> Result<subjects::Model, SubjectError> {
        let existing = subjects::Entity::find()
            .filter(subjects::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(SubjectError::DuplicateCode(input.code));
        }

        let now = Utc::now().into();
        let active = subjects::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Gets a subject by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<subjects::Model, SubjectError> {
        subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(SubjectError::NotFound(id))
    }

    /// Lists all subjects ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<subjects::Model>, SubjectError> {
        Ok(subjects::Entity::find()
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await?)
    }
}
