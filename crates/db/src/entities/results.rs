//! `SeaORM` Entity for the results table.
//!
//! One row per (student, subject, academic_year, term). The derived
//! columns (marks_obtained, total_marks, grade) are recomputed from the
//! raw scores on every write; they are never written independently.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::Term;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject_id: Uuid,
    pub academic_year_id: Uuid,
    pub term: Term,
    /// Class the student was in when the result was recorded; may differ
    /// from the student's current class after a transfer.
    pub recorded_class_id: Option<Uuid>,
    pub ca1_score: Decimal,
    pub ca2_score: Decimal,
    pub ca3_score: Decimal,
    pub ca4_score: Decimal,
    pub exam_score: Decimal,
    pub marks_obtained: Decimal,
    pub total_marks: Decimal,
    pub grade: String,
    pub remarks: Option<String>,
    pub uploaded_by: Option<Uuid>,
    pub upload_date: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Students,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subjects,
    #[sea_orm(
        belongs_to = "super::academic_years::Entity",
        from = "Column::AcademicYearId",
        to = "super::academic_years::Column::Id"
    )]
    AcademicYears,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::RecordedClassId",
        to = "super::classes::Column::Id"
    )]
    Classes,
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::UploadedBy",
        to = "super::staff::Column::Id"
    )]
    Staff,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subjects.def()
    }
}

impl Related<super::academic_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicYears.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
