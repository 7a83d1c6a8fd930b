//! `SeaORM` Entity for the staff table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::StaffDesignation;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub staff_code: String,
    pub designation: StaffDesignation,
    pub joining_date: Date,
    pub qualification: Option<String>,
    pub experience_years: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_one = "super::classes::Entity")]
    Classes,
    #[sea_orm(has_many = "super::staff_subjects::Entity")]
    StaffSubjects,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        super::staff_subjects::Relation::Subjects.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::staff_subjects::Relation::Staff.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
