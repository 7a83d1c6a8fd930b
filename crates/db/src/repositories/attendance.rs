//! Attendance repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use scholaris_core::visibility::VisibilityScope;

use crate::entities::{
    attendance, classes, parent_children, sea_orm_active_enums::AttendanceStatus, students,
};

/// Error types for attendance operations.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    /// Student not found.
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),

    /// Class not found.
    #[error("Class not found: {0}")]
    ClassNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for marking attendance.
#[derive(Debug, Clone)]
pub struct MarkAttendanceInput {
    /// Student profile ID.
    pub student_id: Uuid,
    /// Attendance date.
    pub date: NaiveDate,
    /// Status.
    pub status: AttendanceStatus,
    /// Class the attendance belongs to.
    pub class_id: Uuid,
    /// Staff member marking it.
    pub marked_by: Option<Uuid>,
    /// Optional remarks.
    pub remarks: Option<String>,
}

/// Attendance repository.
#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    db: DatabaseConnection,
}

impl AttendanceRepository {
    /// Creates a new attendance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks attendance for a student on a date. A second mark for the
    /// same (student, date, class) updates the existing row.
    ///
    /// # Errors
    ///
    /// Returns an error if the student or class does not exist, or the
    /// database operation fails.
    pub async fn mark(
        &self,
        input: MarkAttendanceInput,
    ) -> Result<attendance::Model, AttendanceError> {
        students::Entity::find_by_id(input.student_id)
            .one(&self.db)
            .await?
            .ok_or(AttendanceError::StudentNotFound(input.student_id))?;

        classes::Entity::find_by_id(input.class_id)
            .one(&self.db)
            .await?
            .ok_or(AttendanceError::ClassNotFound(input.class_id))?;

        let existing = attendance::Entity::find()
            .filter(attendance::Column::StudentId.eq(input.student_id))
            .filter(attendance::Column::Date.eq(input.date))
            .filter(attendance::Column::ClassId.eq(input.class_id))
            .one(&self.db)
            .await?;

        let now = Utc::now().into();

        let model = if let Some(existing) = existing {
            let mut active: attendance::ActiveModel = existing.into();
            active.status = Set(input.status);
            active.marked_by = Set(input.marked_by);
            active.remarks = Set(input.remarks);
            active.updated_at = Set(now);
            active.update(&self.db).await?
        } else {
            let active = attendance::ActiveModel {
                id: Set(Uuid::new_v4()),
                student_id: Set(input.student_id),
                date: Set(input.date),
                status: Set(input.status),
                class_id: Set(input.class_id),
                marked_by: Set(input.marked_by),
                remarks: Set(input.remarks),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(&self.db).await?
        };

        Ok(model)
    }

    /// Lists attendance rows visible to the given scope, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_scoped(
        &self,
        scope: VisibilityScope,
    ) -> Result<Vec<attendance::Model>, AttendanceError> {
        let query = attendance::Entity::find().order_by_desc(attendance::Column::Date);

        let query = match scope {
            VisibilityScope::All => query,
            VisibilityScope::TaughtClasses { staff_id } => {
                let class_ids: Vec<Uuid> = classes::Entity::find()
                    .filter(classes::Column::ClassTeacherId.eq(staff_id))
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(|c| c.id)
                    .collect();
                query.filter(attendance::Column::ClassId.is_in(class_ids))
            }
            VisibilityScope::OwnChildren { parent_id } => {
                let child_ids: Vec<Uuid> = parent_children::Entity::find()
                    .filter(parent_children::Column::ParentId.eq(parent_id))
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(|link| link.student_id)
                    .collect();
                query.filter(attendance::Column::StudentId.is_in(child_ids))
            }
            VisibilityScope::SelfOnly { user_id } => {
                let Some(student) = students::Entity::find()
                    .filter(students::Column::UserId.eq(user_id))
                    .one(&self.db)
                    .await?
                else {
                    return Ok(Vec::new());
                };
                query.filter(attendance::Column::StudentId.eq(student.id))
            }
            VisibilityScope::Nothing => return Ok(Vec::new()),
        };

        Ok(query.all(&self.db).await?)
    }
}
