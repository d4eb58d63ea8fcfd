use crate::models::{LoginResponse, Session, SignupResponse, User};
use crate::storage::{LocalStorage, USER_DATA_KEY, USER_TOKEN_KEY};
use crate::validate::Field;
use chrono::Utc;
use tracing::warn;

pub const DEMO_EMAIL: &str = "demo@moodtracker.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_NAME: &str = "Demo User";

pub const SIGNUP_NOTICE: &str = "Account created successfully! Please sign in.";
const DEFAULT_LOGIN_FAILURE: &str = "Invalid credentials";
const DEFAULT_SIGNUP_FAILURE: &str = "Account creation failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn { session: Session, user: User },
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Created(String),
    Rejected(String),
}

impl LoginOutcome {
    pub const REJECTION_FIELD: Field = Field::Password;

    pub fn from_response(response: LoginResponse) -> Self {
        match response {
            LoginResponse {
                success: true,
                token: Some(token),
                user: Some(user),
                ..
            } => LoginOutcome::LoggedIn {
                session: Session {
                    name: user.name.clone(),
                    email: user.email.clone(),
                    token,
                },
                user,
            },
            LoginResponse { message, .. } => LoginOutcome::Rejected(
                message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_LOGIN_FAILURE.to_string()),
            ),
        }
    }
}

impl SignupOutcome {
    pub const REJECTION_FIELD: Field = Field::Email;

    pub fn from_response(response: SignupResponse) -> Self {
        if response.success {
            SignupOutcome::Created(SIGNUP_NOTICE.to_string())
        } else {
            SignupOutcome::Rejected(
                response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_SIGNUP_FAILURE.to_string()),
            )
        }
    }
}

pub fn mock_login(email: &str, password: &str) -> LoginResponse {
    if email == DEMO_EMAIL && password == DEMO_PASSWORD {
        LoginResponse {
            success: true,
            token: Some(format!("mock_jwt_token_{}", Utc::now().timestamp_millis())),
            user: Some(User {
                id: 1,
                name: DEMO_NAME.to_string(),
                email: email.to_string(),
            }),
            message: None,
        }
    } else {
        LoginResponse {
            success: false,
            message: Some("Invalid email or password".to_string()),
            ..LoginResponse::default()
        }
    }
}

pub fn mock_signup() -> SignupResponse {
    SignupResponse {
        success: true,
        message: Some("Account created successfully".to_string()),
    }
}

pub fn restore_session(storage: &LocalStorage) -> Option<Session> {
    let token = storage.get(USER_TOKEN_KEY)?;
    let user: User = match serde_json::from_str(storage.get(USER_DATA_KEY)?) {
        Ok(user) => user,
        Err(err) => {
            warn!("ignoring unreadable user data: {err}");
            return None;
        }
    };
    Some(Session {
        name: user.name,
        email: user.email,
        token: token.to_string(),
    })
}

pub async fn persist_session(storage: &mut LocalStorage, session: &Session, user: &User) {
    if let Err(err) = storage.set(USER_TOKEN_KEY, session.token.clone()).await {
        warn!("failed to persist session token: {err}");
    }
    match serde_json::to_string(user) {
        Ok(data) => {
            if let Err(err) = storage.set(USER_DATA_KEY, data).await {
                warn!("failed to persist user data: {err}");
            }
        }
        Err(err) => warn!("failed to serialize user data: {err}"),
    }
}
