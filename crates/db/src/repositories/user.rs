//! User repository: accounts, profile resolution, and scoped listing.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use scholaris_core::visibility::{Principal, Role, VisibilityScope};

use crate::entities::{
    classes, parent_children, parents, sea_orm_active_enums::UserRole, staff, students, users,
};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Username already taken.
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user account.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Unique username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role.
    pub role: UserRole,
    /// Optional phone number.
    pub phone_number: Option<String>,
    /// Optional date of birth.
    pub date_of_birth: Option<chrono::NaiveDate>,
    /// Optional address.
    pub address: Option<String>,
}

/// Input for updating a user's own profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// New email.
    pub email: Option<String>,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New phone number.
    pub phone_number: Option<Option<String>>,
    /// New address.
    pub address: Option<Option<String>>,
}

/// User repository for account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, UserError> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, UserError> {
        Ok(users::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is taken or the database
    /// operation fails.
    pub async fn create_user(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        if self.find_by_username(&input.username).await?.is_some() {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let now = Utc::now().into();
        let active = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            role: Set(input.role),
            phone_number: Set(input.phone_number),
            date_of_birth: Set(input.date_of_birth),
            address: Set(input.address),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Updates a user's own profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the database
    /// operation fails.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<users::Model, UserError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        let mut active: users::ActiveModel = user.into();
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(phone_number) = input.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Resolves the principal for an authenticated user: their role plus
    /// the profile links the visibility resolver needs.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn resolve_principal(&self, user: &users::Model) -> Result<Principal, UserError> {
        let role = Role::from(user.role.clone());
        let mut principal = Principal::new(user.id, role);

        match role {
            Role::Staff => {
                principal.staff_id = staff::Entity::find()
                    .filter(staff::Column::UserId.eq(user.id))
                    .one(&self.db)
                    .await?
                    .map(|s| s.id);
            }
            Role::Student => {
                principal.student_id = students::Entity::find()
                    .filter(students::Column::UserId.eq(user.id))
                    .one(&self.db)
                    .await?
                    .map(|s| s.id);
            }
            Role::Parent => {
                principal.parent_id = parents::Entity::find()
                    .filter(parents::Column::UserId.eq(user.id))
                    .one(&self.db)
                    .await?
                    .map(|p| p.id);
            }
            Role::Admin | Role::Management => {}
        }

        Ok(principal)
    }

    /// Lists user accounts visible to the given scope.
    ///
    /// Staff see themselves plus the students of classes they teach;
    /// parents see themselves plus their children; students see only
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_scoped(
        &self,
        scope: VisibilityScope,
        caller_id: Uuid,
    ) -> Result<Vec<users::Model>, UserError> {
        let query = users::Entity::find();

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

                let student_user_ids: Vec<Uuid> = if class_ids.is_empty() {
                    Vec::new()
                } else {
                    students::Entity::find()
                        .filter(students::Column::CurrentClassId.is_in(class_ids))
                        .all(&self.db)
                        .await?
                        .into_iter()
                        .map(|s| s.user_id)
                        .collect()
                };

                query.filter(
                    Condition::any()
                        .add(users::Column::Id.eq(caller_id))
                        .add(users::Column::Id.is_in(student_user_ids)),
                )
            }
            VisibilityScope::OwnChildren { parent_id } => {
                let child_ids: Vec<Uuid> = parent_children::Entity::find()
                    .filter(parent_children::Column::ParentId.eq(parent_id))
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(|link| link.student_id)
                    .collect();

                let child_user_ids: Vec<Uuid> = if child_ids.is_empty() {
                    Vec::new()
                } else {
                    students::Entity::find()
                        .filter(students::Column::Id.is_in(child_ids))
                        .all(&self.db)
                        .await?
                        .into_iter()
                        .map(|s| s.user_id)
                        .collect()
                };

                query.filter(
                    Condition::any()
                        .add(users::Column::Id.eq(caller_id))
                        .add(users::Column::Id.is_in(child_user_ids)),
                )
            }
            VisibilityScope::SelfOnly { user_id } => query.filter(users::Column::Id.eq(user_id)),
            VisibilityScope::Nothing => query.filter(users::Column::Id.eq(caller_id)),
        };

        Ok(query.all(&self.db).await?)
    }
}
