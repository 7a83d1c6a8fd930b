//! Announcement repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use scholaris_core::visibility::Role;

use crate::entities::{announcements, sea_orm_active_enums::AnnouncementPriority};

/// Error types for announcement operations.
#[derive(Debug, thiserror::Error)]
pub enum AnnouncementError {
    /// Announcement not found.
    #[error("Announcement not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an announcement.
#[derive(Debug, Clone)]
pub struct CreateAnnouncementInput {
    /// Title.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Priority.
    pub priority: AnnouncementPriority,
    /// Author's user ID.
    pub created_by: Uuid,
    /// Optional expiry timestamp.
    pub expires_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    /// Whether students should see it.
    pub for_students: bool,
    /// Whether parents should see it.
    pub for_parents: bool,
    /// Whether staff should see it.
    pub for_staff: bool,
    /// Whether management should see it.
    pub for_management: bool,
}

/// Announcement repository.
#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    db: DatabaseConnection,
}

impl AnnouncementRepository {
    /// Creates a new announcement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an announcement.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateAnnouncementInput,
    ) -> Result<announcements::Model, AnnouncementError> {
        let now = Utc::now().into();
        let active = announcements::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            content: Set(input.content),
            priority: Set(input.priority),
            created_by: Set(input.created_by),
            expires_at: Set(input.expires_at),
            is_active: Set(true),
            for_students: Set(input.for_students),
            for_parents: Set(input.for_parents),
            for_staff: Set(input.for_staff),
            for_management: Set(input.for_management),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Lists active announcements visible to the caller's role, newest
    /// first. Admins see every active announcement.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_role(
        &self,
        role: Role,
    ) -> Result<Vec<announcements::Model>, AnnouncementError> {
        let mut query = announcements::Entity::find()
            .filter(announcements::Column::IsActive.eq(true))
            .order_by_desc(announcements::Column::CreatedAt);

        query = match role {
            Role::Admin => query,
            Role::Management => query.filter(announcements::Column::ForManagement.eq(true)),
            Role::Staff => query.filter(announcements::Column::ForStaff.eq(true)),
            Role::Student => query.filter(announcements::Column::ForStudents.eq(true)),
            Role::Parent => query.filter(announcements::Column::ForParents.eq(true)),
        };

        Ok(query.all(&self.db).await?)
    }

    /// Deactivates an announcement.
    ///
    /// # Errors
    ///
    /// Returns an error if the announcement does not exist or the
    /// database operation fails.
    pub async fn deactivate(&self, id: Uuid) -> Result<announcements::Model, AnnouncementError> {
        let announcement = announcements::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AnnouncementError::NotFound(id))?;

        let mut active: announcements::ActiveModel = announcement.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }
}
