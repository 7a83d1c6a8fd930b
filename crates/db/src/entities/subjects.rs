//! `SeaORM` Entity for the subjects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::results::Entity")]
    Results,
    #[sea_orm(has_many = "super::staff_subjects::Entity")]
    StaffSubjects,
}

impl Related<super::results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        super::staff_subjects::Relation::Staff.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::staff_subjects::Relation::Subjects.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
