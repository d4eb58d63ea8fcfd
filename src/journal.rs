use crate::auth::{self, LoginOutcome, SignupOutcome};
use crate::classifier;
use crate::config::Config;
use crate::errors::GatewayError;
use crate::gateway::RemoteGateway;
use crate::models::{
    ChartPoint, Classification, ClassificationSource, DashboardStats, JournalEntry, LoginForm,
    LoginResponse, Session, SignupForm, SignupResponse, Submission,
};
use crate::stats;
use crate::storage::LocalStorage;
use crate::store::EntryStore;
use crate::validate::{self, FieldErrors};
use chrono::Utc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

#[derive(Debug)]
pub struct MoodJournal {
    storage: LocalStorage,
    entries: EntryStore,
    session: Option<Session>,
    gateway: Option<RemoteGateway>,
    classify_delay: Duration,
    mock_delay: Duration,
    last_submission: Option<Submission>,
}

impl MoodJournal {
    pub fn new(storage: LocalStorage, gateway: Option<RemoteGateway>) -> Self {
        let entries = EntryStore::load_or_seed(&storage);
        let session = auth::restore_session(&storage);
        Self {
            storage,
            entries,
            session,
            gateway,
            classify_delay: Duration::ZERO,
            mock_delay: Duration::ZERO,
            last_submission: None,
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let storage = LocalStorage::open(&config.data_path).await;
        let gateway = if config.remote_enabled {
            Some(RemoteGateway::new(config.api_base.clone(), config.api_timeout)?)
        } else {
            None
        };
        Ok(Self::new(storage, gateway).with_delays(config.classify_delay, config.mock_delay))
    }

    pub fn with_delays(mut self, classify_delay: Duration, mock_delay: Duration) -> Self {
        self.classify_delay = classify_delay;
        self.mock_delay = mock_delay;
        self
    }

    pub fn has_remote(&self) -> bool {
        self.gateway.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    pub fn stats(&self) -> DashboardStats {
        stats::recompute(self.entries.entries())
    }

    pub fn chart(&self) -> Vec<ChartPoint> {
        stats::chart_feed(&self.entries)
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            gateway: self.gateway.clone(),
            session: self.session.clone(),
            classify_delay: self.classify_delay,
            mock_delay: self.mock_delay,
        }
    }

    pub async fn submit(&mut self, text: &str) -> Option<Submission> {
        if text.trim().is_empty() {
            return None;
        }
        let (classification, source) = self.dispatcher().classify(text).await;
        Some(self.record(text, classification, source).await)
    }

    pub async fn record(
        &mut self,
        text: &str,
        classification: Classification,
        source: ClassificationSource,
    ) -> Submission {
        let entry = JournalEntry {
            date: Utc::now().date_naive(),
            text: text.to_string(),
            emotion: classification.emotion,
            score: round_score(classification.score),
        };
        info!(
            emotion = %entry.emotion,
            score = entry.score,
            source = ?source,
            "journal entry classified"
        );

        self.entries.prepend(entry.clone());
        self.entries.save(&mut self.storage).await;

        let submission = Submission {
            color: classification.color,
            message: entry.emotion.message(),
            entry,
            source,
            stats: self.stats(),
        };
        self.last_submission = Some(submission.clone());
        submission
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<LoginOutcome, FieldErrors> {
        let outcome = self.dispatcher().login(form).await?;
        self.start_session(&outcome).await;
        Ok(outcome)
    }

    pub async fn start_session(&mut self, outcome: &LoginOutcome) {
        if let LoginOutcome::LoggedIn { session, user } = outcome {
            auth::persist_session(&mut self.storage, session, user).await;
            self.session = Some(session.clone());
            info!(email = %session.email, "logged in");
        }
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<SignupOutcome, FieldErrors> {
        self.dispatcher().signup(form).await
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    gateway: Option<RemoteGateway>,
    session: Option<Session>,
    classify_delay: Duration,
    mock_delay: Duration,
}

impl Dispatcher {
    pub async fn classify(&self, text: &str) -> (Classification, ClassificationSource) {
        if let (Some(gateway), Some(session)) = (&self.gateway, &self.session) {
            match gateway.classify(text, &session.email, &session.token).await {
                Ok(classification) => return (classification, ClassificationSource::Remote),
                Err(err) => warn!("remote classification failed, using local classifier: {err}"),
            }
        }
        sleep(self.classify_delay).await;
        (classifier::classify(text), ClassificationSource::Local)
    }

    pub async fn login(&self, form: &LoginForm) -> Result<LoginOutcome, FieldErrors> {
        validate::validate_login(form)?;
        let email = form.email.trim();

        let response = match &self.gateway {
            Some(gateway) => match gateway.login(email, &form.password).await {
                Ok(response) => response,
                Err(err) => {
                    warn!("login request failed, using demo accounts: {err}");
                    self.mock_login(email, &form.password).await
                }
            },
            None => self.mock_login(email, &form.password).await,
        };
        Ok(LoginOutcome::from_response(response))
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<SignupOutcome, FieldErrors> {
        validate::validate_signup(form)?;
        let name = form.name.trim();
        let email = form.email.trim();

        let response = match &self.gateway {
            Some(gateway) => match gateway.signup(name, email, &form.password).await {
                Ok(response) => response,
                Err(err) => {
                    warn!("signup request failed, using mock signup: {err}");
                    self.mock_signup().await
                }
            },
            None => self.mock_signup().await,
        };
        Ok(SignupOutcome::from_response(response))
    }

    async fn mock_login(&self, email: &str, password: &str) -> LoginResponse {
        sleep(self.mock_delay).await;
        auth::mock_login(email, password)
    }

    async fn mock_signup(&self) -> SignupResponse {
        sleep(self.mock_delay).await;
        auth::mock_signup()
    }
}

fn round_score(score: f64) -> u8 {
    if score.is_finite() {
        score.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}
