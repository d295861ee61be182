use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo_types::{NewUser, User, UserRole},
};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[a-z0-9]{4,10}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

pub(crate) fn is_valid_password(password: &str) -> bool {
    lazy_static! {
        static ref PASSWORD_RE: Regex =
            Regex::new(r"^[a-zA-Z0-9!@#$%^&*()_+=\-]{8,15}$").unwrap();
    }
    PASSWORD_RE.is_match(password)
}

fn issue_tokens(st: &AppState, user: &User) -> AppResult<AuthResponse> {
    let keys = JwtKeys::from_ref(st);
    Ok(AuthResponse {
        access_token: keys.sign_access(user.id)?,
        refresh_token: keys.sign_refresh(user.id)?,
        user: PublicUser::from(user),
    })
}

pub async fn register(st: &AppState, mut req: RegisterRequest) -> AppResult<AuthResponse> {
    req.username = req.username.trim().to_string();

    if !is_valid_username(&req.username) {
        return Err(AppError::Validation(
            "username must be 4-10 lowercase letters or digits".into(),
        ));
    }
    if !is_valid_password(&req.password) {
        return Err(AppError::Validation(
            "password must be 8-15 letters, digits or symbols".into(),
        ));
    }

    let role = if req.admin {
        let expected = st.config.admin_token.as_deref();
        if expected.is_none() || req.admin_token.as_deref() != expected {
            warn!(username = %req.username, "admin registration with bad token");
            return Err(AppError::Forbidden("invalid admin token".into()));
        }
        UserRole::Admin
    } else {
        UserRole::Member
    };

    if st.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("username already registered".into()));
    }

    let password_hash = hash_password(&req.password)?;
    let user = st
        .users
        .create(NewUser {
            username: req.username,
            password_hash,
            role,
        })
        .await?
        .ok_or_else(|| AppError::Conflict("username already registered".into()))?;

    info!(user_id = user.id, username = %user.username, role = ?user.role, "user registered");
    issue_tokens(st, &user)
}

pub async fn login(st: &AppState, req: LoginRequest) -> AppResult<AuthResponse> {
    let username = req.username.trim();
    let Some(user) = st.users.find_by_username(username).await? else {
        warn!(%username, "login unknown username");
        return Err(AppError::Unauthorized("invalid credentials".into()));
    };

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized("invalid credentials".into()));
    }

    info!(user_id = user.id, "user logged in");
    issue_tokens(st, &user)
}

pub async fn refresh(st: &AppState, refresh_token: &str) -> AppResult<AuthResponse> {
    let keys = JwtKeys::from_ref(st);
    let claims = keys
        .verify_refresh(refresh_token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let user = st
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("user not found".into()))?;
    issue_tokens(st, &user)
}

/// Flips the withdrawal flag of the given user.
pub async fn toggle_withdrawal(st: &AppState, user: &User) -> AppResult<PublicUser> {
    let updated = st
        .users
        .set_withdrawal(user.id, !user.withdrawal)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user.id)))?;
    info!(user_id = updated.id, withdrawal = updated.withdrawal, "withdrawal toggled");
    Ok(PublicUser::from(&updated))
}
