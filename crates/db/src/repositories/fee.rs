//! Fee repository: fee schedules and the payment ledger.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use scholaris_core::fees::{FeeError, FeeResolution, FeeService};
use scholaris_core::grading::Term;
use scholaris_core::visibility::VisibilityScope;

use crate::entities::{
    academic_years, classes, fee_payments, fee_structures, parent_children,
    sea_orm_active_enums::{FeeType, Term as DbTerm},
    students,
};

/// Error types for fee operations.
#[derive(Debug, thiserror::Error)]
pub enum FeeRepoError {
    /// Payment amount failed validation; nothing was written.
    #[error(transparent)]
    InvalidAmount(#[from] FeeError),

    /// Fee payments are only accepted for first, second, and third terms.
    #[error("fee payments are not accepted for the {0} term")]
    InvalidTerm(Term),

    /// Student not found.
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),

    /// Academic year not found.
    #[error("Academic year not found: {0}")]
    AcademicYearNotFound(Uuid),

    /// Fee structure already exists for this year, grade, and type.
    #[error("Fee structure already exists for this year, grade, and fee type")]
    DuplicateStructure,

    /// Fee structure not found.
    #[error("Fee structure not found: {0}")]
    StructureNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a fee structure.
#[derive(Debug, Clone)]
pub struct CreateFeeStructureInput {
    /// Academic year the fee applies to.
    pub academic_year_id: Uuid,
    /// Grade level the fee applies to.
    pub grade: i32,
    /// Fee type.
    pub fee_type: FeeType,
    /// Required amount.
    pub amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// Input for applying a payment to the ledger.
#[derive(Debug, Clone)]
pub struct ApplyPaymentInput {
    /// Student profile ID.
    pub student_id: Uuid,
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Term the payment is for (first/second/third).
    pub term: Term,
    /// Advisory fee structure reference from the caller.
    pub fee_structure_id: Option<Uuid>,
    /// Incoming payment amount.
    pub amount: Decimal,
    /// Caller-supplied total; used only when no schedule or structure
    /// resolves.
    pub total_amount: Option<Decimal>,
    /// Due date; required when the ledger row is first created.
    pub due_date: Option<NaiveDate>,
    /// Payment method, e.g. "Cash" or "Bank Transfer".
    pub payment_method: Option<String>,
    /// External transaction reference.
    pub transaction_id: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

/// Fee repository for schedule and ledger operations.
#[derive(Debug, Clone)]
pub struct FeeRepository {
    db: DatabaseConnection,
}

impl FeeRepository {
    /// Creates a new fee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Fee structures (static reference data)
    // ========================================================================

    /// Creates a fee structure.
    ///
    /// # Errors
    ///
    /// Returns an error if a structure already exists for the
    /// (year, grade, type) triple or the database operation fails.
    pub async fn create_structure(
        &self,
        input: CreateFeeStructureInput,
    ) -> Result<fee_structures::Model, FeeRepoError> {
        academic_years::Entity::find_by_id(input.academic_year_id)
            .one(&self.db)
            .await?
            .ok_or(FeeRepoError::AcademicYearNotFound(input.academic_year_id))?;

        let existing = fee_structures::Entity::find()
            .filter(fee_structures::Column::AcademicYearId.eq(input.academic_year_id))
            .filter(fee_structures::Column::Grade.eq(input.grade))
            .filter(fee_structures::Column::FeeType.eq(input.fee_type.clone()))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(FeeRepoError::DuplicateStructure);
        }

        let now = Utc::now().into();
        let active = fee_structures::ActiveModel {
            id: Set(Uuid::new_v4()),
            academic_year_id: Set(input.academic_year_id),
            grade: Set(input.grade),
            fee_type: Set(input.fee_type),
            amount: Set(input.amount),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Lists fee structures, optionally restricted to a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_structures(
        &self,
        academic_year_id: Option<Uuid>,
    ) -> Result<Vec<fee_structures::Model>, FeeRepoError> {
        let mut query = fee_structures::Entity::find().order_by_asc(fee_structures::Column::Grade);
        if let Some(year) = academic_year_id {
            query = query.filter(fee_structures::Column::AcademicYearId.eq(year));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Gets a fee structure by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the structure is not found or the query fails.
    pub async fn get_structure(&self, id: Uuid) -> Result<fee_structures::Model, FeeRepoError> {
        fee_structures::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(FeeRepoError::StructureNotFound(id))
    }

    // ========================================================================
    // Payment ledger
    // ========================================================================

    /// Applies a payment to the ledger row for (student, year, term).
    ///
    /// The authoritative full amount is re-resolved on every call: the
    /// tuition schedule for the student's current grade overrides the
    /// caller's structure hint, which overrides the caller's total, which
    /// falls back to the payment itself. Repeated payments accumulate
    /// into the single row and are capped at the full amount; metadata
    /// fields are overwritten only when the caller supplies a non-empty
    /// value.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, the term is not a fee
    /// term, a referenced entity does not exist, or the database
    /// operation fails.
    pub async fn apply_payment(
        &self,
        input: ApplyPaymentInput,
    ) -> Result<fee_payments::Model, FeeRepoError> {
        // Validate shape before touching storage.
        if input.amount < Decimal::ZERO {
            return Err(FeeError::NegativeAmount(input.amount).into());
        }
        if input.term == Term::Final {
            return Err(FeeRepoError::InvalidTerm(input.term));
        }

        let student = students::Entity::find_by_id(input.student_id)
            .one(&self.db)
            .await?
            .ok_or(FeeRepoError::StudentNotFound(input.student_id))?;

        academic_years::Entity::find_by_id(input.academic_year_id)
            .one(&self.db)
            .await?
            .ok_or(FeeRepoError::AcademicYearNotFound(input.academic_year_id))?;

        // The schedule amount for the student's current grade is
        // authoritative; a stale or wrong client-supplied structure id
        // must not win.
        let schedule_amount = self
            .tuition_amount_for(&student, input.academic_year_id)
            .await?;

        let structure_hint_amount = match input.fee_structure_id {
            Some(id) => fee_structures::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|s| s.amount),
            None => None,
        };

        let resolution = FeeResolution {
            schedule_amount,
            structure_hint_amount,
            requested_total: input.total_amount,
        };
        let total_amount = FeeService::resolve_total_amount(&resolution, input.amount);

        let existing = fee_payments::Entity::find()
            .filter(fee_payments::Column::StudentId.eq(input.student_id))
            .filter(fee_payments::Column::AcademicYearId.eq(input.academic_year_id))
            .filter(fee_payments::Column::Term.eq(DbTerm::from(input.term)))
            .one(&self.db)
            .await?;

        let update = FeeService::apply_payment(
            existing.as_ref().map(|row| row.amount_paid),
            input.amount,
            total_amount,
        )?;

        let now = Utc::now().into();

        let model = if let Some(existing) = existing {
            let mut active: fee_payments::ActiveModel = existing.into();
            active.amount_paid = Set(update.amount_paid);
            active.total_amount = Set(update.total_amount);
            active.status = Set(update.status.into());
            active.payment_date = Set(now);
            // Partial-update semantics: empty or absent fields preserve
            // prior values.
            if let Some(due_date) = input.due_date {
                active.due_date = Set(due_date);
            }
            if let Some(structure_id) = input.fee_structure_id {
                active.fee_structure_id = Set(Some(structure_id));
            }
            if let Some(method) = non_empty(input.payment_method) {
                active.payment_method = Set(Some(method));
            }
            if let Some(txn_id) = non_empty(input.transaction_id) {
                active.transaction_id = Set(Some(txn_id));
            }
            if let Some(remarks) = non_empty(input.remarks) {
                active.remarks = Set(Some(remarks));
            }
            active.updated_at = Set(now);
            active.update(&self.db).await?
        } else {
            let active = fee_payments::ActiveModel {
                id: Set(Uuid::new_v4()),
                student_id: Set(input.student_id),
                fee_structure_id: Set(input.fee_structure_id),
                academic_year_id: Set(input.academic_year_id),
                term: Set(input.term.into()),
                amount_paid: Set(update.amount_paid),
                total_amount: Set(update.total_amount),
                status: Set(update.status.into()),
                payment_date: Set(now),
                due_date: Set(input.due_date.unwrap_or_else(|| Utc::now().date_naive())),
                payment_method: Set(non_empty(input.payment_method)),
                transaction_id: Set(non_empty(input.transaction_id)),
                remarks: Set(non_empty(input.remarks)),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(&self.db).await?
        };

        Ok(model)
    }

    /// Lists ledger rows visible to the given scope, newest first.
    ///
    /// Staff have no fee visibility; their scope resolves to nothing
    /// here.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_payments(
        &self,
        scope: VisibilityScope,
    ) -> Result<Vec<fee_payments::Model>, FeeRepoError> {
        let query = fee_payments::Entity::find().order_by_desc(fee_payments::Column::PaymentDate);

        let query = match scope {
            VisibilityScope::All => query,
            VisibilityScope::SelfOnly { user_id } => {
                let Some(student) = students::Entity::find()
                    .filter(students::Column::UserId.eq(user_id))
                    .one(&self.db)
                    .await?
                else {
                    return Ok(Vec::new());
                };
                query.filter(fee_payments::Column::StudentId.eq(student.id))
            }
            VisibilityScope::OwnChildren { parent_id } => {
                let children: Vec<Uuid> = parent_children::Entity::find()
                    .filter(parent_children::Column::ParentId.eq(parent_id))
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(|link| link.student_id)
                    .collect();
                query.filter(fee_payments::Column::StudentId.is_in(children))
            }
            VisibilityScope::TaughtClasses { .. } | VisibilityScope::Nothing => {
                return Ok(Vec::new());
            }
        };

        Ok(query.all(&self.db).await?)
    }

    /// Looks up the tuition amount for the student's current grade, if a
    /// schedule row exists.
    async fn tuition_amount_for(
        &self,
        student: &students::Model,
        academic_year_id: Uuid,
    ) -> Result<Option<Decimal>, DbErr> {
        let Some(class_id) = student.current_class_id else {
            return Ok(None);
        };

        let Some(class) = classes::Entity::find_by_id(class_id).one(&self.db).await? else {
            return Ok(None);
        };

        let schedule = fee_structures::Entity::find()
            .filter(fee_structures::Column::AcademicYearId.eq(academic_year_id))
            .filter(fee_structures::Column::Grade.eq(class.grade))
            .filter(fee_structures::Column::FeeType.eq(FeeType::Tuition))
            .one(&self.db)
            .await?;

        Ok(schedule.map(|s| s.amount))
    }
}

/// Treats empty strings as absent for partial-update semantics.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_empty_filters_blank_metadata() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(
            non_empty(Some("Bank Transfer".to_string())),
            Some("Bank Transfer".to_string())
        );
    }

    #[test]
    fn test_resolution_prefers_schedule_over_hint() {
        let resolution = FeeResolution {
            schedule_amount: Some(dec!(450)),
            structure_hint_amount: Some(dec!(999)),
            requested_total: Some(dec!(1)),
        };

        assert_eq!(
            FeeService::resolve_total_amount(&resolution, dec!(100)),
            dec!(450)
        );
    }
}
