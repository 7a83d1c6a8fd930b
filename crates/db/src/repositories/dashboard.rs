//! Dashboard repository for per-role aggregate counts.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{
    classes, fee_payments, parent_children, parents, results,
    sea_orm_active_enums::PaymentStatus, staff, staff_subjects, students, subjects,
};

/// Error types for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Student profile not found for the caller.
    #[error("Student profile not found for user: {0}")]
    StudentProfileNotFound(Uuid),

    /// Staff profile not found for the caller.
    #[error("Staff profile not found for user: {0}")]
    StaffProfileNotFound(Uuid),

    /// Parent profile not found for the caller.
    #[error("Parent profile not found for user: {0}")]
    ParentProfileNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// School-wide statistics for management callers.
#[derive(Debug, Clone)]
pub struct ManagementStats {
    /// Total enrolled students.
    pub total_students: u64,
    /// Total staff members.
    pub total_staff: u64,
    /// Total parents.
    pub total_parents: u64,
    /// Total classes.
    pub total_classes: u64,
    /// Total subjects.
    pub total_subjects: u64,
    /// Ledger rows still pending payment.
    pub pending_fee_payments: u64,
}

/// Statistics for a staff caller.
#[derive(Debug, Clone)]
pub struct StaffStats {
    /// Classes this staff member teaches.
    pub assigned_classes: u64,
    /// Subjects this staff member teaches.
    pub assigned_subjects: u64,
    /// Students across the taught classes.
    pub students_count: u64,
}

/// Statistics for a student caller.
#[derive(Debug, Clone)]
pub struct StudentStats {
    /// Current class name, if enrolled.
    pub current_class: Option<String>,
    /// Recorded results.
    pub total_results: u64,
    /// Pending fee ledger rows.
    pub pending_fees: u64,
}

/// Statistics for a parent caller.
#[derive(Debug, Clone)]
pub struct ParentStats {
    /// Linked children.
    pub children_count: u64,
    /// Pending fee ledger rows across all children.
    pub total_pending_fees: u64,
}

/// Dashboard repository for aggregate queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// School-wide counts for admin and management callers.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn management_stats(&self) -> Result<ManagementStats, DashboardError> {
        Ok(ManagementStats {
            total_students: students::Entity::find().count(&self.db).await?,
            total_staff: staff::Entity::find().count(&self.db).await?,
            total_parents: parents::Entity::find().count(&self.db).await?,
            total_classes: classes::Entity::find().count(&self.db).await?,
            total_subjects: subjects::Entity::find().count(&self.db).await?,
            pending_fee_payments: fee_payments::Entity::find()
                .filter(fee_payments::Column::Status.eq(PaymentStatus::Pending))
                .count(&self.db)
                .await?,
        })
    }

    /// Counts for a staff caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff profile does not exist or a query
    /// fails.
    pub async fn staff_stats(&self, user_id: Uuid) -> Result<StaffStats, DashboardError> {
        let staff = staff::Entity::find()
            .filter(staff::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(DashboardError::StaffProfileNotFound(user_id))?;

        let class_ids: Vec<Uuid> = classes::Entity::find()
            .filter(classes::Column::ClassTeacherId.eq(staff.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        let students_count = if class_ids.is_empty() {
            0
        } else {
            students::Entity::find()
                .filter(students::Column::CurrentClassId.is_in(class_ids.clone()))
                .count(&self.db)
                .await?
        };

        Ok(StaffStats {
            assigned_classes: class_ids.len() as u64,
            assigned_subjects: staff_subjects::Entity::find()
                .filter(staff_subjects::Column::StaffId.eq(staff.id))
                .count(&self.db)
                .await?,
            students_count,
        })
    }

    /// Counts for a student caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the student profile does not exist or a query
    /// fails.
    pub async fn student_stats(&self, user_id: Uuid) -> Result<StudentStats, DashboardError> {
        let student = students::Entity::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(DashboardError::StudentProfileNotFound(user_id))?;

        let current_class = match student.current_class_id {
            Some(class_id) => classes::Entity::find_by_id(class_id)
                .one(&self.db)
                .await?
                .map(|c| c.name),
            None => None,
        };

        Ok(StudentStats {
            current_class,
            total_results: results::Entity::find()
                .filter(results::Column::StudentId.eq(student.id))
                .count(&self.db)
                .await?,
            pending_fees: fee_payments::Entity::find()
                .filter(fee_payments::Column::StudentId.eq(student.id))
                .filter(fee_payments::Column::Status.eq(PaymentStatus::Pending))
                .count(&self.db)
                .await?,
        })
    }

    /// Counts for a parent caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent profile does not exist or a query
    /// fails.
    pub async fn parent_stats(&self, user_id: Uuid) -> Result<ParentStats, DashboardError> {
        let parent = parents::Entity::find()
            .filter(parents::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(DashboardError::ParentProfileNotFound(user_id))?;

        let child_ids: Vec<Uuid> = parent_children::Entity::find()
            .filter(parent_children::Column::ParentId.eq(parent.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.student_id)
            .collect();

        let total_pending_fees = if child_ids.is_empty() {
            0
        } else {
            fee_payments::Entity::find()
                .filter(fee_payments::Column::StudentId.is_in(child_ids.clone()))
                .filter(fee_payments::Column::Status.eq(PaymentStatus::Pending))
                .count(&self.db)
                .await?
        };

        Ok(ParentStats {
            children_count: child_ids.len() as u64,
            total_pending_fees,
        })
    }
}
