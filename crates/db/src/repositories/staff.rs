//! Staff repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use scholaris_core::visibility::VisibilityScope;

use crate::entities::{
    sea_orm_active_enums::StaffDesignation, staff, staff_subjects, subjects, users,
};

/// Error types for staff operations.
#[derive(Debug, thiserror::Error)]
pub enum StaffError {
    /// Staff member not found.
    #[error("Staff not found: {0}")]
    NotFound(Uuid),

    /// User account not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Subject not found.
    #[error("Subject not found: {0}")]
    SubjectNotFound(Uuid),

    /// Staff code already in use.
    #[error("Staff code already exists: {0}")]
    DuplicateCode(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a staff profile.
#[derive(Debug, Clone)]
pub struct CreateStaffInput {
    /// Linked user account.
    pub user_id: Uuid,
    /// Unique staff code.
    pub staff_code: String,
    /// Designation.
    pub designation: StaffDesignation,
    /// Joining date.
    pub joining_date: NaiveDate,
    /// Qualification summary.
    pub qualification: Option<String>,
    /// Years of experience.
    pub experience_years: i32,
}

/// Staff repository for profile operations.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    db: DatabaseConnection,
}

impl StaffRepository {
    /// Creates a new staff repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a staff profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist, the code is taken,
    /// or the database operation fails.
    pub async fn create(&self, input: CreateStaffInput) -> Result<staff::Model, StaffError> {
        users::Entity::find_by_id(input.user_id)
            .one(&self.db)
            .await?
            .ok_or(StaffError::UserNotFound(input.user_id))?;

        let existing = staff::Entity::find()
            .filter(staff::Column::StaffCode.eq(&input.staff_code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(StaffError::DuplicateCode(input.staff_code));
        }

        let now = Utc::now().into();
        let active = staff::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            staff_code: Set(input.staff_code),
            designation: Set(input.designation),
            joining_date: Set(input.joining_date),
            qualification: Set(input.qualification),
            experience_years: Set(input.experience_years),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Gets a staff member by profile ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff member is not found or the query
    /// fails.
    pub async fn get(&self, id: Uuid) -> Result<staff::Model, StaffError> {
        staff::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StaffError::NotFound(id))
    }

    /// Lists staff visible to the given scope. Only admin and management
    /// see the full roster; everyone else sees their own profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_scoped(
        &self,
        scope: VisibilityScope,
        caller_user_id: Uuid,
    ) -> Result<Vec<staff::Model>, StaffError> {
        let query = staff::Entity::find().order_by_asc(staff::Column::StaffCode);

        let query = match scope {
            VisibilityScope::All => query,
            _ => query.filter(staff::Column::UserId.eq(caller_user_id)),
        };

        Ok(query.all(&self.db).await?)
    }

    /// Replaces the set of subjects a staff member teaches.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff member or any subject does not
    /// exist, or the database operation fails.
    pub async fn set_subjects(
        &self,
        staff_id: Uuid,
        subject_ids: Vec<Uuid>,
    ) -> Result<(), StaffError> {
        self.get(staff_id).await?;

        for subject_id in &subject_ids {
            subjects::Entity::find_by_id(*subject_id)
                .one(&self.db)
                .await?
                .ok_or(StaffError::SubjectNotFound(*subject_id))?;
        }

        staff_subjects::Entity::delete_many()
            .filter(staff_subjects::Column::StaffId.eq(staff_id))
            .exec(&self.db)
            .await?;

        for subject_id in subject_ids {
            let link = staff_subjects::ActiveModel {
                staff_id: Set(staff_id),
                subject_id: Set(subject_id),
            };
            link.insert(&self.db).await?;
        }

        Ok(())
    }

    /// Lists the subjects a staff member teaches.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff member does not exist or the query
    /// fails.
    pub async fn subjects(&self, staff_id: Uuid) -> Result<Vec<subjects::Model>, StaffError> {
        self.get(staff_id).await?;

        let links = staff_subjects::Entity::find()
            .filter(staff_subjects::Column::StaffId.eq(staff_id))
            .all(&self.db)
            .await?;

        let mut out = Vec::with_capacity(links.len());
        for link in links {
            if let Some(subject) = subjects::Entity::find_by_id(link.subject_id)
                .one(&self.db)
                .await?
            {
                out.push(subject);
            }
        }

        Ok(out)
    }
}
