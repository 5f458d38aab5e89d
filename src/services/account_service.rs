use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        Role,
        password::{hash_password, verify_dummy, verify_password},
    },
    db::dao::{DaoBase, DaoLayerError, NewUser, UserDao},
    db::entities::user,
    error::AppError,
    services::farmer_service::FarmerService,
};

pub const EMAIL_TAKEN: &str = "Email already registered";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub contact_no: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: user::Model,
    pub role: Role,
}

#[derive(Clone)]
pub struct AccountService {
    users: UserDao,
    farmers: FarmerService,
}

impl AccountService {
    pub fn new(users: UserDao, farmers: FarmerService) -> Self {
        Self { users, farmers }
    }

    pub async fn register(&self, registration: Registration) -> Result<user::Model, AppError> {
        let Registration {
            name,
            email,
            password,
            role,
            contact_no,
        } = registration;
        let email = normalize_email(&email);

        // Rejects short passwords before anything touches the database.
        let password_hash = hash_password(&password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let new_user = NewUser {
            name,
            email,
            password_hash,
            role,
        };
        let user = self.insert_account(new_user, contact_no.as_deref()).await?;
        info!(user_id = %user.id, role = role.as_str(), "user registered");
        Ok(user)
    }

    /// Writes the account rows. A concurrent registration that slipped past
    /// the email lookup surfaces as the same conflict.
    async fn insert_account(
        &self,
        new_user: NewUser,
        contact_no: Option<&str>,
    ) -> Result<user::Model, AppError> {
        let created = match new_user.role {
            Role::Farmer => self
                .users
                .create_user_with_farmer_profile(new_user, contact_no)
                .await
                .map(|(user, profile)| {
                    info!(user_id = %user.id, farmer_id = %profile.id, "farmer profile created at registration");
                    user
                }),
            _ => self.users.create_user(new_user).await,
        };

        match created {
            Ok(user) => Ok(user),
            Err(DaoLayerError::UniqueViolation { .. }) => Err(AppError::conflict(EMAIL_TAKEN)),
            Err(err) => Err(err.into()),
        }
    }

    /// Checks credentials. Unknown email and wrong password fail with the
    /// same error and comparable cost. Farmers get their profile ensured.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Authenticated, AppError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            verify_dummy(password);
            warn!("login rejected: unknown account");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let role = user
            .role
            .parse::<Role>()
            .map_err(|err| AppError::internal(format!("user {} has {err}", user.id)))?;

        let now = chrono::Utc::now().fixed_offset();
        self.users.set_last_login(&user.id, &now).await?;

        if role == Role::Farmer {
            self.farmers.ensure_profile(&user).await?;
        }

        info!(user_id = %user.id, role = role.as_str(), "user logged in");
        Ok(Authenticated { user, role })
    }

    pub async fn find_user(&self, id: &Uuid) -> Result<Option<user::Model>, AppError> {
        match self.users.find_by_id(*id).await {
            Ok(model) => Ok(Some(model)),
            Err(DaoLayerError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
