use crate::auth::{LoginOutcome, SignupOutcome};
use crate::journal::MoodJournal;
use crate::models::{LoginForm, SignupForm, Submission};
use crate::validate::FieldErrors;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Commands lock the journal only to snapshot and to commit. Delays and
/// backend calls run unlocked, so pages keep rendering meanwhile.
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<Mutex<MoodJournal>>,
}

impl AppState {
    pub fn new(journal: MoodJournal) -> Self {
        Self {
            journal: Arc::new(Mutex::new(journal)),
        }
    }

    pub async fn submit(&self, text: &str) -> Option<Submission> {
        if text.trim().is_empty() {
            return None;
        }
        let dispatcher = self.journal.lock().await.dispatcher();
        let (classification, source) = dispatcher.classify(text).await;
        let mut journal = self.journal.lock().await;
        Some(journal.record(text, classification, source).await)
    }

    pub async fn login(&self, form: &LoginForm) -> Result<LoginOutcome, FieldErrors> {
        let dispatcher = self.journal.lock().await.dispatcher();
        let outcome = dispatcher.login(form).await?;
        self.journal.lock().await.start_session(&outcome).await;
        Ok(outcome)
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<SignupOutcome, FieldErrors> {
        let dispatcher = self.journal.lock().await.dispatcher();
        dispatcher.signup(form).await
    }
}
