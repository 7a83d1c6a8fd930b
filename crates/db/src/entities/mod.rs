//! `SeaORM` entity definitions.

pub mod academic_years;
pub mod announcements;
pub mod attendance;
pub mod classes;
pub mod fee_payments;
pub mod fee_structures;
pub mod parent_children;
pub mod parents;
pub mod results;
pub mod sea_orm_active_enums;
pub mod staff;
pub mod staff_subjects;
pub mod students;
pub mod subjects;
pub mod users;
