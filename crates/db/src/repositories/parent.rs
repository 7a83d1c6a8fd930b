//! Parent repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use scholaris_core::visibility::VisibilityScope;

use crate::entities::{parent_children, parents, students, users};

/// Error types for parent operations.
#[derive(Debug, thiserror::Error)]
pub enum ParentError {
    /// Parent not found.
    #[error("Parent not found: {0}")]
    NotFound(Uuid),

    /// User account not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Student not found.
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),

    /// Parent code already in use.
    #[error("Parent code already exists: {0}")]
    DuplicateCode(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a parent profile.
#[derive(Debug, Clone)]
pub struct CreateParentInput {
    /// Linked user account.
    pub user_id: Uuid,
    /// Unique parent code.
    pub parent_code: String,
}

/// Parent repository for profile and child-link operations.
#[derive(Debug, Clone)]
pub struct ParentRepository {
    db: DatabaseConnection,
}

impl ParentRepository {
    /// Creates a new parent repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a parent profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist, the code is taken,
    /// or the database operation fails.
    pub async fn create(&self, input: CreateParentInput) -> Result<parents::Model, ParentError> {
        users::Entity::find_by_id(input.user_id)
            .one(&self.db)
            .await?
            .ok_or(ParentError::UserNotFound(input.user_id))?;

        let existing = parents::Entity::find()
            .filter(parents::Column::ParentCode.eq(&input.parent_code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(ParentError::DuplicateCode(input.parent_code));
        }

        let now = Utc::now().into();
        let active = parents::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            parent_code: Set(input.parent_code),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Gets a parent by profile ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<parents::Model, ParentError> {
        parents::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ParentError::NotFound(id))
    }

    /// Lists parents visible to the given scope. Only admin and
    /// management see the full roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_scoped(
        &self,
        scope: VisibilityScope,
        caller_user_id: Uuid,
    ) -> Result<Vec<parents::Model>, ParentError> {
        let query = parents::Entity::find().order_by_asc(parents::Column::ParentCode);

        let query = match scope {
            VisibilityScope::All => query,
            _ => query.filter(parents::Column::UserId.eq(caller_user_id)),
        };

        Ok(query.all(&self.db).await?)
    }

    /// Links a child to a parent. Linking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent or student does not exist, or the
    /// database operation fails.
    pub async fn add_child(&self, parent_id: Uuid, student_id: Uuid) -> Result<(), ParentError> {
        self.get(parent_id).await?;

        students::Entity::find_by_id(student_id)
            .one(&self.db)
            .await?
            .ok_or(ParentError::StudentNotFound(student_id))?;

        let existing = parent_children::Entity::find()
            .filter(parent_children::Column::ParentId.eq(parent_id))
            .filter(parent_children::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await?;

        if existing.is_none() {
            let link = parent_children::ActiveModel {
                parent_id: Set(parent_id),
                student_id: Set(student_id),
            };
            link.insert(&self.db).await?;
        }

        Ok(())
    }

    /// Lists a parent's children.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent does not exist or the query fails.
    pub async fn children(&self, parent_id: Uuid) -> Result<Vec<students::Model>, ParentError> {
        self.get(parent_id).await?;

        let links = parent_children::Entity::find()
            .filter(parent_children::Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await?;

        let mut out = Vec::with_capacity(links.len());
        for link in links {
            if let Some(student) = students::Entity::find_by_id(link.student_id)
                .one(&self.db)
                .await?
            {
                out.push(student);
            }
        }

        Ok(out)
    }
}
