use crate::auth::{LoginOutcome, SignupOutcome};
use crate::errors::AppError;
use crate::models::{
    JournalEntry, JournalRequest, LoginForm, LoginResponse, SignupForm, SignupResponse,
    StatsResponse, Submission,
};
use crate::state::AppState;
use crate::ui::{AuthMode, AuthView, DashboardView, render_auth, render_dashboard};
use crate::validate::FieldErrors;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;

const DEFAULT_RECENT: usize = 3;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let journal = state.journal.lock().await;
    let stats = journal.stats();
    let chart = journal.chart();
    Html(render_dashboard(&DashboardView {
        stats: &stats,
        recent: journal.entries().recent(DEFAULT_RECENT),
        chart: &chart,
        last: journal.last_submission(),
        session: journal.session(),
    }))
}

pub async fn journal_form(
    State(state): State<AppState>,
    Form(payload): Form<JournalRequest>,
) -> Redirect {
    state.submit(&payload.text).await;
    Redirect::to("/")
}

#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    pub mode: Option<String>,
}

pub async fn auth_page(State(state): State<AppState>, Query(query): Query<AuthQuery>) -> Response {
    if state.journal.lock().await.session().is_some() {
        return Redirect::to("/").into_response();
    }
    let mode = match query.mode.as_deref() {
        Some("signup") => AuthMode::Signup,
        _ => AuthMode::Login,
    };
    Html(render_auth(&AuthView {
        mode,
        ..AuthView::default()
    }))
    .into_response()
}

pub async fn login_form(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let outcome = state.login(&form).await;
    let mut view = AuthView {
        email: form.email.trim().to_string(),
        ..AuthView::default()
    };
    match outcome {
        Ok(LoginOutcome::LoggedIn { .. }) => return Redirect::to("/").into_response(),
        Ok(LoginOutcome::Rejected(message)) => {
            view.errors.push(LoginOutcome::REJECTION_FIELD, message);
        }
        Err(errors) => view.errors = errors,
    }
    Html(render_auth(&view)).into_response()
}

pub async fn signup_form(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Html<String> {
    let outcome = state.signup(&form).await;
    let view = match outcome {
        Ok(SignupOutcome::Created(notice)) => AuthView {
            notice: Some(notice),
            ..AuthView::default()
        },
        Ok(SignupOutcome::Rejected(message)) => {
            let mut errors = FieldErrors::default();
            errors.push(SignupOutcome::REJECTION_FIELD, message);
            signup_view(&form, errors)
        }
        Err(errors) => signup_view(&form, errors),
    };
    Html(render_auth(&view))
}

fn signup_view(form: &SignupForm, errors: FieldErrors) -> AuthView {
    AuthView {
        mode: AuthMode::Signup,
        errors,
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        ..AuthView::default()
    }
}

pub async fn oauth_placeholder(Path(provider): Path<String>) -> AppError {
    AppError::not_implemented(format!(
        "Sign-in with {provider} is not available in this demo."
    ))
}

pub async fn premium_placeholder() -> AppError {
    AppError::not_implemented("Premium subscriptions are not available in this demo.")
}

pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<JournalRequest>,
) -> Result<Json<Submission>, AppError> {
    let submission = state.submit(&payload.text).await;
    submission
        .map(Json)
        .ok_or_else(|| AppError::bad_request("Text is required"))
}

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub limit: Option<usize>,
}

pub async fn get_entries(
    State(state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> Json<Vec<JournalEntry>> {
    let journal = state.journal.lock().await;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT);
    Json(journal.entries().recent(limit).to_vec())
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let journal = state.journal.lock().await;
    Json(StatsResponse {
        stats: journal.stats(),
        chart: journal.chart(),
    })
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state.login(&form).await.map_err(AppError::invalid)?;
    let response = match outcome {
        LoginOutcome::LoggedIn { session, user } => LoginResponse {
            success: true,
            token: Some(session.token),
            user: Some(user),
            message: None,
        },
        LoginOutcome::Rejected(message) => LoginResponse {
            success: false,
            message: Some(message),
            ..LoginResponse::default()
        },
    };
    Ok(Json(response))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> Result<Json<SignupResponse>, AppError> {
    let outcome = state.signup(&form).await.map_err(AppError::invalid)?;
    let response = match outcome {
        SignupOutcome::Created(message) => SignupResponse {
            success: true,
            message: Some(message),
        },
        SignupOutcome::Rejected(message) => SignupResponse {
            success: false,
            message: Some(message),
        },
    };
    Ok(Json(response))
}
