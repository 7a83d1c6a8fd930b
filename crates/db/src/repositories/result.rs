//! Result repository: score recording with recompute-on-write and class
//! rankings.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use scholaris_core::grading::{GradingError, GradingService, ScoreSheet, Term};
use scholaris_core::ranking::{RankedStudent, RankingService, SubjectScore};
use scholaris_core::visibility::VisibilityScope;

use crate::entities::{
    academic_years, classes, parent_children, results, students, subjects, users,
};

/// Error types for result operations.
#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    /// A raw score failed validation; nothing was written.
    #[error(transparent)]
    InvalidScores(#[from] GradingError),

    /// Student not found.
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),

    /// Subject not found.
    #[error("Subject not found: {0}")]
    SubjectNotFound(Uuid),

    /// Academic year not found.
    #[error("Academic year not found: {0}")]
    AcademicYearNotFound(Uuid),

    /// Class not found.
    #[error("Class not found: {0}")]
    ClassNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording or updating a result.
#[derive(Debug, Clone)]
pub struct RecordResultInput {
    /// Student profile ID.
    pub student_id: Uuid,
    /// Subject ID.
    pub subject_id: Uuid,
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Term the scores belong to.
    pub term: Term,
    /// Class to snapshot on the row; defaults to the student's current
    /// class when absent.
    pub recorded_class_id: Option<Uuid>,
    /// Raw assessment scores.
    pub scores: ScoreSheet,
    /// Optional remarks.
    pub remarks: Option<String>,
    /// Staff member recording the result.
    pub uploaded_by: Option<Uuid>,
}

/// A result row joined with its display context.
#[derive(Debug, Clone)]
pub struct ResultWithContext {
    /// The result row.
    pub result: results::Model,
    /// Student display name.
    pub student_name: String,
    /// Subject name.
    pub subject_name: String,
    /// Academic year name.
    pub academic_year_name: String,
}

/// Result repository for score recording and ranking queries.
#[derive(Debug, Clone)]
pub struct ResultRepository {
    db: DatabaseConnection,
}

impl ResultRepository {
    /// Creates a new result repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records or updates a result for (student, subject, year, term).
    ///
    /// Scores are validated before anything is read or written. All
    /// derived columns are recomputed from the raw scores on both the
    /// create and the update path; a duplicate key updates in place and
    /// never creates a second row.
    ///
    /// # Errors
    ///
    /// Returns an error if a score is out of range, a referenced entity
    /// does not exist, or the database operation fails.
    pub async fn record_result(
        &self,
        input: RecordResultInput,
    ) -> Result<results::Model, ResultError> {
        // Validate before touching storage; a failed sheet writes nothing.
        let graded = GradingService::grade(&input.scores)?;

        let student = students::Entity::find_by_id(input.student_id)
            .one(&self.db)
            .await?
            .ok_or(ResultError::StudentNotFound(input.student_id))?;

        subjects::Entity::find_by_id(input.subject_id)
            .one(&self.db)
            .await?
            .ok_or(ResultError::SubjectNotFound(input.subject_id))?;

        academic_years::Entity::find_by_id(input.academic_year_id)
            .one(&self.db)
            .await?
            .ok_or(ResultError::AcademicYearNotFound(input.academic_year_id))?;

        let recorded_class_id = input.recorded_class_id.or(student.current_class_id);

        let existing = results::Entity::find()
            .filter(results::Column::StudentId.eq(input.student_id))
            .filter(results::Column::SubjectId.eq(input.subject_id))
            .filter(results::Column::AcademicYearId.eq(input.academic_year_id))
            .filter(results::Column::Term.eq(crate::entities::sea_orm_active_enums::Term::from(
                input.term,
            )))
            .one(&self.db)
            .await?;

        let now = Utc::now().into();

        let model = if let Some(existing) = existing {
            let mut active: results::ActiveModel = existing.into();
            active.recorded_class_id = Set(recorded_class_id);
            active.ca1_score = Set(input.scores.ca1_score);
            active.ca2_score = Set(input.scores.ca2_score);
            active.ca3_score = Set(input.scores.ca3_score);
            active.ca4_score = Set(input.scores.ca4_score);
            active.exam_score = Set(input.scores.exam_score);
            active.marks_obtained = Set(graded.marks_obtained);
            active.total_marks = Set(graded.total_marks);
            active.grade = Set(graded.grade.as_str().to_string());
            if input.remarks.is_some() {
                active.remarks = Set(input.remarks);
            }
            if input.uploaded_by.is_some() {
                active.uploaded_by = Set(input.uploaded_by);
            }
            active.updated_at = Set(now);
            active.update(&self.db).await?
        } else {
            let active = results::ActiveModel {
                id: Set(Uuid::new_v4()),
                student_id: Set(input.student_id),
                subject_id: Set(input.subject_id),
                academic_year_id: Set(input.academic_year_id),
                term: Set(input.term.into()),
                recorded_class_id: Set(recorded_class_id),
                ca1_score: Set(input.scores.ca1_score),
                ca2_score: Set(input.scores.ca2_score),
                ca3_score: Set(input.scores.ca3_score),
                ca4_score: Set(input.scores.ca4_score),
                exam_score: Set(input.scores.exam_score),
                marks_obtained: Set(graded.marks_obtained),
                total_marks: Set(graded.total_marks),
                grade: Set(graded.grade.as_str().to_string()),
                remarks: Set(input.remarks),
                uploaded_by: Set(input.uploaded_by),
                upload_date: Set(now),
                updated_at: Set(now),
            };
            active.insert(&self.db).await?
        };

        Ok(model)
    }

    /// Lists results visible to the given scope, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_scoped(
        &self,
        scope: VisibilityScope,
    ) -> Result<Vec<ResultWithContext>, ResultError> {
        let mut query = results::Entity::find().order_by_desc(results::Column::UploadDate);

        query = match scope {
            VisibilityScope::All => query,
            VisibilityScope::TaughtClasses { staff_id } => {
                let student_ids = self.students_taught_by(staff_id).await?;
                query.filter(
                    Condition::any()
                        .add(results::Column::UploadedBy.eq(staff_id))
                        .add(results::Column::StudentId.is_in(student_ids)),
                )
            }
            VisibilityScope::OwnChildren { parent_id } => {
                let children = self.children_of(parent_id).await?;
                query.filter(results::Column::StudentId.is_in(children))
            }
            VisibilityScope::SelfOnly { user_id } => {
                let Some(student) = students::Entity::find()
                    .filter(students::Column::UserId.eq(user_id))
                    .one(&self.db)
                    .await?
                else {
                    return Ok(Vec::new());
                };
                query.filter(results::Column::StudentId.eq(student.id))
            }
            VisibilityScope::Nothing => return Ok(Vec::new()),
        };

        let rows = query.all(&self.db).await?;
        self.with_context(rows).await
    }

    /// Computes ranked standings for a class and term.
    ///
    /// Collects results of students *currently* in the class (the
    /// recorded-class snapshot is deliberately not used here) and feeds
    /// them to the ranking aggregation. An empty result set yields an
    /// empty table, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the class or academic year does not exist, or
    /// a database query fails.
    pub async fn class_rankings(
        &self,
        class_id: Uuid,
        term: Term,
        academic_year_id: Uuid,
    ) -> Result<Vec<RankedStudent>, ResultError> {
        classes::Entity::find_by_id(class_id)
            .one(&self.db)
            .await?
            .ok_or(ResultError::ClassNotFound(class_id))?;

        academic_years::Entity::find_by_id(academic_year_id)
            .one(&self.db)
            .await?
            .ok_or(ResultError::AcademicYearNotFound(academic_year_id))?;

        let class_students = students::Entity::find()
            .filter(students::Column::CurrentClassId.eq(class_id))
            .all(&self.db)
            .await?;

        if class_students.is_empty() {
            return Ok(Vec::new());
        }

        let mut scores = Vec::new();
        for student in class_students {
            let name = self.student_display_name(&student).await?;

            let rows = results::Entity::find()
                .filter(results::Column::StudentId.eq(student.id))
                .filter(results::Column::AcademicYearId.eq(academic_year_id))
                .filter(results::Column::Term.eq(
                    crate::entities::sea_orm_active_enums::Term::from(term),
                ))
                .all(&self.db)
                .await?;

            for row in rows {
                let subject_name = subjects::Entity::find_by_id(row.subject_id)
                    .one(&self.db)
                    .await?
                    .map(|s| s.name)
                    .unwrap_or_default();

                scores.push(SubjectScore {
                    student_id: student.id,
                    student_name: name.clone(),
                    subject_name,
                    marks_obtained: row.marks_obtained,
                    total_marks: row.total_marks,
                    grade: scholaris_core::grading::Grade::from_percentage(
                        if row.total_marks.is_zero() {
                            rust_decimal::Decimal::ZERO
                        } else {
                            row.marks_obtained / row.total_marks * rust_decimal::Decimal::ONE_HUNDRED
                        },
                    ),
                });
            }
        }

        Ok(RankingService::rank(scores))
    }

    /// Resolves student profile IDs of every class taught by a staff
    /// member.
    async fn students_taught_by(&self, staff_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let class_ids: Vec<Uuid> = classes::Entity::find()
            .filter(classes::Column::ClassTeacherId.eq(staff_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = students::Entity::find()
            .filter(students::Column::CurrentClassId.is_in(class_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        Ok(ids)
    }

    /// Resolves the student profile IDs of a parent's children.
    async fn children_of(&self, parent_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let ids = parent_children::Entity::find()
            .filter(parent_children::Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.student_id)
            .collect();

        Ok(ids)
    }

    async fn student_display_name(&self, student: &students::Model) -> Result<String, DbErr> {
        Ok(users::Entity::find_by_id(student.user_id)
            .one(&self.db)
            .await?
            .map(|u| u.full_name())
            .unwrap_or_else(|| student.student_code.clone()))
    }

    async fn with_context(
        &self,
        rows: Vec<results::Model>,
    ) -> Result<Vec<ResultWithContext>, ResultError> {
        let mut out = Vec::with_capacity(rows.len());

        for result in rows {
            let student_name = match students::Entity::find_by_id(result.student_id)
                .one(&self.db)
                .await?
            {
                Some(student) => self.student_display_name(&student).await?,
                None => String::new(),
            };

            let subject_name = subjects::Entity::find_by_id(result.subject_id)
                .one(&self.db)
                .await?
                .map(|s| s.name)
                .unwrap_or_default();

            let academic_year_name = academic_years::Entity::find_by_id(result.academic_year_id)
                .one(&self.db)
                .await?
                .map(|y| y.name)
                .unwrap_or_default();

            out.push(ResultWithContext {
                result,
                student_name,
                subject_name,
                academic_year_name,
            });
        }

        Ok(out)
    }
}
