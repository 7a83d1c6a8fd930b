//! Database enum types mapped to `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use scholaris_core::fees::PaymentStatus as CorePaymentStatus;
use scholaris_core::grading::Term as CoreTerm;
use scholaris_core::visibility::Role;

/// User role.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// School-wide administrative access.
    #[sea_orm(string_value = "management")]
    Management,
    /// Teaching staff.
    #[sea_orm(string_value = "staff")]
    Staff,
    /// Enrolled student.
    #[sea_orm(string_value = "student")]
    Student,
    /// Parent or guardian.
    #[sea_orm(string_value = "parent")]
    Parent,
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Management => Self::Management,
            UserRole::Staff => Self::Staff,
            UserRole::Student => Self::Student,
            UserRole::Parent => Self::Parent,
        }
    }
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Management => Self::Management,
            Role::Staff => Self::Staff,
            Role::Student => Self::Student,
            Role::Parent => Self::Parent,
        }
    }
}

/// Academic term.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "term")]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// First term.
    #[sea_orm(string_value = "first")]
    First,
    /// Second term.
    #[sea_orm(string_value = "second")]
    Second,
    /// Third term.
    #[sea_orm(string_value = "third")]
    Third,
    /// Final exam period.
    #[sea_orm(string_value = "final")]
    Final,
}

impl From<CoreTerm> for Term {
    fn from(term: CoreTerm) -> Self {
        match term {
            CoreTerm::First => Self::First,
            CoreTerm::Second => Self::Second,
            CoreTerm::Third => Self::Third,
            CoreTerm::Final => Self::Final,
        }
    }
}

impl From<Term> for CoreTerm {
    fn from(term: Term) -> Self {
        match term {
            Term::First => Self::First,
            Term::Second => Self::Second,
            Term::Third => Self::Third,
            Term::Final => Self::Final,
        }
    }
}

/// Fee type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "fee_type")]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    /// Tuition fee; the authoritative type for ledger resolution.
    #[sea_orm(string_value = "tuition")]
    Tuition,
    /// Examination fee.
    #[sea_orm(string_value = "examination")]
    Examination,
    /// Transport fee.
    #[sea_orm(string_value = "transport")]
    Transport,
    /// Hostel fee.
    #[sea_orm(string_value = "hostel")]
    Hostel,
    /// Any other fee.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Payment status of a fee ledger row.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Fully paid.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Past due.
    #[sea_orm(string_value = "overdue")]
    Overdue,
    /// Partially paid.
    #[sea_orm(string_value = "partial")]
    Partial,
}

impl From<CorePaymentStatus> for PaymentStatus {
    fn from(status: CorePaymentStatus) -> Self {
        match status {
            CorePaymentStatus::Pending => Self::Pending,
            CorePaymentStatus::Paid => Self::Paid,
            CorePaymentStatus::Overdue => Self::Overdue,
            CorePaymentStatus::Partial => Self::Partial,
        }
    }
}

impl From<PaymentStatus> for CorePaymentStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pending => Self::Pending,
            PaymentStatus::Paid => Self::Paid,
            PaymentStatus::Overdue => Self::Overdue,
            PaymentStatus::Partial => Self::Partial,
        }
    }
}

/// Staff designation.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "staff_designation")]
#[serde(rename_all = "snake_case")]
pub enum StaffDesignation {
    /// Classroom teacher.
    #[sea_orm(string_value = "teacher")]
    Teacher,
    /// School principal.
    #[sea_orm(string_value = "principal")]
    Principal,
    /// Vice principal.
    #[sea_orm(string_value = "vice_principal")]
    VicePrincipal,
    /// Administrative staff.
    #[sea_orm(string_value = "administrator")]
    Administrator,
    /// Librarian.
    #[sea_orm(string_value = "librarian")]
    Librarian,
    /// Counselor.
    #[sea_orm(string_value = "counselor")]
    Counselor,
}

/// Announcement priority.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "announcement_priority")]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementPriority {
    /// Low priority.
    #[sea_orm(string_value = "low")]
    Low,
    /// Medium priority.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// High priority.
    #[sea_orm(string_value = "high")]
    High,
    /// Urgent.
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

/// Attendance status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Present.
    #[sea_orm(string_value = "present")]
    Present,
    /// Absent.
    #[sea_orm(string_value = "absent")]
    Absent,
    /// Arrived late.
    #[sea_orm(string_value = "late")]
    Late,
    /// Excused absence.
    #[sea_orm(string_value = "excused")]
    Excused,
}
