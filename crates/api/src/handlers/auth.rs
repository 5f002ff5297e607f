//! Handlers for registration, email verification, login, and logout.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use serde_json::Value;
use tickbox_core::error::CoreError;
use tickbox_core::session::{Session, SessionIdentity};
use tickbox_core::types::DbId;
use tickbox_core::user::NewUser;
use tickbox_core::validation::{is_email, validate_registration};

use crate::auth::email_token::{
    generate_verification_token, verify_verification_token, VerifyTokenError,
};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::session_token::sign_session_id;
use crate::error::{AppError, AppResult};
use crate::middleware::session::{SessionUser, SESSION_COOKIE};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Identity snapshot returned by `GET /dashboard`.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Validate the registration payload, store the new user, and send the email
/// verification link. Redirects to the login page on success.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Redirect> {
    // 1. Validate shape, lengths, and email format; report every violation.
    let registration = validate_registration(&body).map_err(|violations| {
        let detail = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Core(CoreError::Validation(detail))
    })?;

    // 2. Hash the password before anything touches storage.
    let password_hash = hash_password(&registration.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 3. Store the user; a duplicate email or username surfaces as a conflict.
    let user = state
        .users
        .create(&NewUser {
            username: registration.username,
            email: registration.email,
            display_name: registration.name,
            password_hash,
        })
        .await?;

    // 4. Build the verification link.
    let token = generate_verification_token(&user.email, &state.config.token)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let verify_url = format!(
        "{}/verifytoken/{token}",
        state.config.public_base_url.trim_end_matches('/')
    );

    // 5. Send the email in the background; registration does not wait on SMTP.
    let mailer = state.mailer.clone();
    let to = user.email.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_verification(&to, &verify_url).await {
            tracing::warn!(error = %err, "Failed to send verification email");
        }
    });

    Ok(Redirect::to("/login"))
}

/// GET /verifytoken/{token}
///
/// Mark the email embedded in a valid token as verified. An expired link is
/// a client error; a forged or malformed one is not distinguished further.
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    // 1. Check signature and expiry, recovering the email address.
    let email = verify_verification_token(&token, &state.config.token).map_err(|err| match err {
        VerifyTokenError::Expired => {
            AppError::Core(CoreError::Validation("Verification link has expired".into()))
        }
        VerifyTokenError::Invalid => AppError::InternalError("Verification token is invalid".into()),
    })?;

    // 2. Flip the verification flag; unknown and already-verified emails are
    //    acknowledged the same way.
    state.users.mark_verified(&email).await?;

    Ok(Json(MessageResponse::new(
        "Your email has been authenticated, please go to login page",
    )))
}

/// POST /login
///
/// Authenticate with `loginId` (email or username) + `password`, establish a
/// session, and hand the signed cookie to the browser.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<Value>,
) -> AppResult<(CookieJar, Redirect)> {
    // 1. Shape checks before any lookup.
    let login_id = body.get("loginId");
    let password = body.get("password");
    if is_blank(login_id) || is_blank(password) {
        return Err(validation("Missing credentials"));
    }
    let (login_id, password) = match (
        login_id.and_then(Value::as_str),
        password.and_then(Value::as_str),
    ) {
        (Some(l), Some(p)) => (l, p),
        _ => return Err(validation("Invalid data format")),
    };

    // 2. Resolve the identifier as an email or a username.
    let user = if is_email(login_id) {
        state
            .users
            .find_by_email(login_id)
            .await?
            .ok_or_else(|| validation("Wrong email"))?
    } else {
        state
            .users
            .find_by_username(login_id)
            .await?
            .ok_or_else(|| validation("Wrong username"))?
    };

    // 3. Refuse logins until the email address is verified.
    if !user.is_verified {
        return Err(validation("Please verify your email before logging in"));
    }

    // 4. Verify password.
    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(validation("Incorrect password"));
    }

    // 5. Establish and persist the session.
    let session = Session::establish(SessionIdentity {
        user_id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
    });
    state.sessions.create(&session).await?;

    // 6. Sign the session id into the browser cookie.
    let value = sign_session_id(session.id, &state.config.session_secret);
    let cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::to("/dashboard")))
}

/// GET /dashboard
///
/// Identity snapshot for the authenticated session.
pub async fn dashboard(user: SessionUser) -> Json<DataResponse<IdentityResponse>> {
    Json(DataResponse {
        data: IdentityResponse {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
        },
    })
}

/// POST /logout
///
/// Destroy the current session and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    user: SessionUser,
) -> AppResult<(CookieJar, Redirect)> {
    state.sessions.delete(user.session_id).await?;
    Ok((clear_session_cookie(jar), Redirect::to("/login")))
}

/// POST /logout_from_all_devices
///
/// Destroy every session belonging to the current user, not just this one.
pub async fn logout_all(
    State(state): State<AppState>,
    jar: CookieJar,
    user: SessionUser,
) -> AppResult<(CookieJar, Redirect)> {
    let destroyed = state.sessions.delete_by_username(&user.username).await?;
    tracing::info!(username = %user.username, destroyed, "Destroyed all sessions for user");
    Ok((clear_session_cookie(jar), Redirect::to("/login")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// True when a login field is absent, JSON null, or an empty string.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn validation(msg: &str) -> AppError {
    AppError::Core(CoreError::Validation(msg.into()))
}

fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}
