//! Class repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{academic_years, classes, staff, students};

/// Error types for class operations.
#[derive(Debug, thiserror::Error)]
pub enum ClassError {
    /// Class not found.
    #[error("Class not found: {0}")]
    NotFound(Uuid),

    /// A class already exists for this grade, section, and year.
    #[error("Class already exists for this grade, section, and academic year")]
    DuplicateClass,

    /// Academic year not found.
    #[error("Academic year not found: {0}")]
    AcademicYearNotFound(Uuid),

    /// Staff member not found.
    #[error("Staff not found: {0}")]
    StaffNotFound(Uuid),

    /// The staff member already teaches another class.
    #[error("Staff member is already the class teacher of another class")]
    TeacherAlreadyAssigned,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a class.
#[derive(Debug, Clone)]
pub struct CreateClassInput {
    /// Display name, e.g. "Grade 10 A".
    pub name: String,
    /// Numeric grade level.
    pub grade: i32,
    /// Section letter, may be empty.
    pub section: String,
    /// Academic year the class belongs to.
    pub academic_year_id: Uuid,
    /// Optional class teacher.
    pub class_teacher_id: Option<Uuid>,
}

/// Class repository for CRUD and teacher assignment.
#[derive(Debug, Clone)]
pub struct ClassRepository {
    db: DatabaseConnection,
}

impl ClassRepository {
    /// Creates a new class repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a class.
    ///
    /// # Errors
    ///
    /// Returns an error if the (grade, section, year) triple is taken,
    /// the year or teacher does not exist, the teacher is already
    /// assigned elsewhere, or the database operation fails.
    pub async fn create(&self, input: CreateClassInput) -> Result<classes::Model, ClassError> {
        academic_years::Entity::find_by_id(input.academic_year_id)
            .one(&self.db)
            .await?
            .ok_or(ClassError::AcademicYearNotFound(input.academic_year_id))?;

        let existing = classes::Entity::find()
            .filter(classes::Column::Grade.eq(input.grade))
            .filter(classes::Column::Section.eq(&input.section))
            .filter(classes::Column::AcademicYearId.eq(input.academic_year_id))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(ClassError::DuplicateClass);
        }

        if let Some(teacher_id) = input.class_teacher_id {
            self.ensure_teacher_unassigned(teacher_id, None).await?;
        }

        let now = Utc::now().into();
        let active = classes::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            grade: Set(input.grade),
            section: Set(input.section),
            academic_year_id: Set(input.academic_year_id),
            class_teacher_id: Set(input.class_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Gets a class by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<classes::Model, ClassError> {
        classes::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ClassError::NotFound(id))
    }

    /// Lists classes, optionally restricted to a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        academic_year_id: Option<Uuid>,
    ) -> Result<Vec<classes::Model>, ClassError> {
        let mut query = classes::Entity::find()
            .order_by_asc(classes::Column::Grade)
            .order_by_asc(classes::Column::Section);

        if let Some(year) = academic_year_id {
            query = query.filter(classes::Column::AcademicYearId.eq(year));
        }

        Ok(query.all(&self.db).await?)
    }

    /// Assigns a class teacher, enforcing the one-class-per-teacher rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the class or staff member does not exist, the
    /// teacher is already assigned to a different class, or the database
    /// operation fails.
    pub async fn assign_teacher(
        &self,
        class_id: Uuid,
        staff_id: Uuid,
    ) -> Result<classes::Model, ClassError> {
        let class = self.get(class_id).await?;

        staff::Entity::find_by_id(staff_id)
            .one(&self.db)
            .await?
            .ok_or(ClassError::StaffNotFound(staff_id))?;

        self.ensure_teacher_unassigned(staff_id, Some(class_id))
            .await?;

        let mut active: classes::ActiveModel = class.into();
        active.class_teacher_id = Set(Some(staff_id));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Lists the students currently enrolled in a class.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is not found or the query fails.
    pub async fn students(&self, class_id: Uuid) -> Result<Vec<students::Model>, ClassError> {
        self.get(class_id).await?;

        Ok(students::Entity::find()
            .filter(students::Column::CurrentClassId.eq(class_id))
            .all(&self.db)
            .await?)
    }

    async fn ensure_teacher_unassigned(
        &self,
        staff_id: Uuid,
        allow_class: Option<Uuid>,
    ) -> Result<(), ClassError> {
        let assigned = classes::Entity::find()
            .filter(classes::Column::ClassTeacherId.eq(staff_id))
            .one(&self.db)
            .await?;

        match assigned {
            Some(class) if Some(class.id) != allow_class => {
                Err(ClassError::TeacherAlreadyAssigned)
            }
            _ => Ok(()),
        }
    }
}
