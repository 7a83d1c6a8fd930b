//! Student repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use scholaris_core::visibility::VisibilityScope;
use scholaris_shared::types::{PageRequest, PageResponse};

use crate::entities::{classes, parent_children, students, users};

/// Error types for student operations.
#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    /// Student not found.
    #[error("Student not found: {0}")]
    NotFound(Uuid),

    /// User account not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Class not found.
    #[error("Class not found: {0}")]
    ClassNotFound(Uuid),

    /// Student code already in use.
    #[error("Student code already exists: {0}")]
    DuplicateCode(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a student profile.
#[derive(Debug, Clone)]
pub struct CreateStudentInput {
    /// Linked user account.
    pub user_id: Uuid,
    /// Unique student code.
    pub student_code: String,
    /// Admission date.
    pub admission_date: NaiveDate,
    /// Optional initial class.
    pub current_class_id: Option<Uuid>,
    /// Emergency contact name.
    pub emergency_contact_name: Option<String>,
    /// Emergency contact phone.
    pub emergency_contact_phone: Option<String>,
    /// Medical information.
    pub medical_info: Option<String>,
}

/// A student profile joined with its user account.
#[derive(Debug, Clone)]
pub struct StudentWithUser {
    /// Student profile.
    pub student: students::Model,
    /// Linked account.
    pub user: Option<users::Model>,
    /// Current class name, if enrolled.
    pub current_class_name: Option<String>,
}

/// Student repository for profile operations and scoped listing.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    /// Creates a new student repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a student profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the user or class does not exist, the code is
    /// taken, or the database operation fails.
    pub async fn create(&self, input: CreateStudentInput) -> Result<students::Model, StudentError> {
        users::Entity::find_by_id(input.user_id)
            .one(&self.db)
            .await?
            .ok_or(StudentError::UserNotFound(input.user_id))?;

        if let Some(class_id) = input.current_class_id {
            classes::Entity::find_by_id(class_id)
                .one(&self.db)
                .await?
                .ok_or(StudentError::ClassNotFound(class_id))?;
        }

        let existing = students::Entity::find()
            .filter(students::Column::StudentCode.eq(&input.student_code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(StudentError::DuplicateCode(input.student_code));
        }

        let now = Utc::now().into();
        let active = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            student_code: Set(input.student_code),
            admission_date: Set(input.admission_date),
            current_class_id: Set(input.current_class_id),
            emergency_contact_name: Set(input.emergency_contact_name),
            emergency_contact_phone: Set(input.emergency_contact_phone),
            medical_info: Set(input.medical_info),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Gets a student by profile ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the student is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<students::Model, StudentError> {
        students::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StudentError::NotFound(id))
    }

    /// Moves a student to a different class.
    ///
    /// Past results keep their recorded-class snapshot; only the current
    /// class changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the student or class does not exist, or the
    /// database operation fails.
    pub async fn assign_class(
        &self,
        student_id: Uuid,
        class_id: Option<Uuid>,
    ) -> Result<students::Model, StudentError> {
        let student = self.get(student_id).await?;

        if let Some(class_id) = class_id {
            classes::Entity::find_by_id(class_id)
                .one(&self.db)
                .await?
                .ok_or(StudentError::ClassNotFound(class_id))?;
        }

        let mut active: students::ActiveModel = student.into();
        active.current_class_id = Set(class_id);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Lists students visible to the given scope, joined with their
    /// accounts, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_scoped(
        &self,
        scope: VisibilityScope,
        page: &PageRequest,
    ) -> Result<PageResponse<StudentWithUser>, StudentError> {
        let query = students::Entity::find().order_by_asc(students::Column::StudentCode);

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
                query.filter(students::Column::CurrentClassId.is_in(class_ids))
            }
            VisibilityScope::OwnChildren { parent_id } => {
                let child_ids: Vec<Uuid> = parent_children::Entity::find()
                    .filter(parent_children::Column::ParentId.eq(parent_id))
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(|link| link.student_id)
                    .collect();
                query.filter(students::Column::Id.is_in(child_ids))
            }
            VisibilityScope::SelfOnly { user_id } => {
                query.filter(students::Column::UserId.eq(user_id))
            }
            VisibilityScope::Nothing => {
                return Ok(PageResponse::new(Vec::new(), page.page, page.per_page, 0));
            }
        };

        let total = query.clone().count(&self.db).await?;

        let rows = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        let mut out = Vec::with_capacity(rows.len());

        for student in rows {
            let user = users::Entity::find_by_id(student.user_id)
                .one(&self.db)
                .await?;

            let current_class_name = match student.current_class_id {
                Some(class_id) => classes::Entity::find_by_id(class_id)
                    .one(&self.db)
                    .await?
                    .map(|c| c.name),
                None => None,
            };

            out.push(StudentWithUser {
                student,
                user,
                current_class_name,
            });
        }

        Ok(PageResponse::new(out, page.page, page.per_page, total))
    }
}
