//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every visibility-sensitive listing takes a resolved
//! `VisibilityScope` rather than branching on role strings.

pub mod academic_year;
pub mod announcement;
pub mod attendance;
pub mod class;
pub mod dashboard;
pub mod fee;
pub mod parent;
pub mod result;
pub mod staff;
pub mod student;
pub mod subject;
pub mod user;

pub use academic_year::{AcademicYearError, AcademicYearRepository, CreateAcademicYearInput};
pub use announcement::{AnnouncementError, AnnouncementRepository, CreateAnnouncementInput};
pub use attendance::{AttendanceError, AttendanceRepository, MarkAttendanceInput};
pub use class::{ClassError, ClassRepository, CreateClassInput};
pub use dashboard::{
    DashboardError, DashboardRepository, ManagementStats, ParentStats, StaffStats, StudentStats,
};
pub use fee::{ApplyPaymentInput, CreateFeeStructureInput, FeeRepoError, FeeRepository};
pub use parent::{CreateParentInput, ParentError, ParentRepository};
pub use result::{RecordResultInput, ResultError, ResultRepository, ResultWithContext};
pub use staff::{CreateStaffInput, StaffError, StaffRepository};
pub use student::{CreateStudentInput, StudentError, StudentRepository, StudentWithUser};
pub use subject::{CreateSubjectInput, SubjectError, SubjectRepository};
pub use user::{CreateUserInput, UpdateProfileInput, UserError, UserRepository};
