use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use lectern_auth::{UserRole, create_access_token};
use lectern_config::JwtConfig;
use lectern_core::{AppError, hash_password, verify_password};
use lectern_models::auth::{LoginRequest, LoginResponse, RegisterRequest};
use lectern_models::users::{User, UserInfo};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthService;

impl AuthService {
    /// Creates a user. Any requested role other than `admin` becomes
    /// `student`; a taken email is reported by the `users_email_key`
    /// constraint rather than a prior lookup.
    ///
    /// # Errors
    ///
    /// * `400` if the email is already registered
    /// * `500` if hashing or the insert fails
    #[instrument(
        skip(db, dto),
        fields(db.operation = "INSERT", db.table = "users", user.email = %dto.email)
    )]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<UserInfo, AppError> {
        let role = UserRole::from_requested(dto.role.as_deref());
        if dto.role.as_deref().is_some_and(|r| r != role.as_str()) {
            debug!(requested = ?dto.role, granted = %role, "Requested role downgraded");
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, UserInfo>(
            r#"INSERT INTO users (name, email, password, role)
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, email, role"#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!("Registration with an existing email");
                return AppError::bad_request(anyhow::anyhow!("Email already exists"));
            }
            AppError::from(e)
        })?;

        info!(user.id = %user.id, user.role = %user.role, "User registered");

        Ok(user)
    }

    /// Checks credentials and issues an access token. Unknown email and wrong
    /// password fail identically.
    ///
    /// # Errors
    ///
    /// * `401` with "Invalid credentials" for an unknown email or a wrong password
    /// * `500` if the lookup, hash verification or token signing fails
    #[instrument(
        skip(db, dto, jwt_config),
        fields(db.operation = "SELECT", db.table = "users", user.email = %dto.email)
    )]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, password, role, created_at, updated_at
               FROM users
               WHERE email = $1 AND NOT deleted"#,
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?;

        let Some(user) = user else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password)? {
            warn!(user.id = %user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = create_access_token(user.id.into_inner(), &user.email, user.role, jwt_config)?;

        info!(user.id = %user.id, "User logged in");

        Ok(LoginResponse {
            token,
            user: UserInfo::from(user),
        })
    }
}
