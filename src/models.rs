use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Sad,
    Anxious,
    Excited,
    Angry,
    Content,
    Neutral,
    Mixed,
}

impl Emotion {
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Anxious => "Anxious",
            Emotion::Excited => "Excited",
            Emotion::Angry => "Angry",
            Emotion::Content => "Content",
            Emotion::Neutral => "Neutral",
            Emotion::Mixed => "Mixed",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Emotion::Happy => "#10B981",
            Emotion::Sad | Emotion::Angry => "#EF4444",
            Emotion::Anxious => "#F59E0B",
            Emotion::Excited => "#8B5CF6",
            Emotion::Content => "#06B6D4",
            Emotion::Neutral | Emotion::Mixed => "#6B7280",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Emotion::Happy => {
                "Your entry radiates positivity and joy! Keep nurturing these good vibes."
            }
            Emotion::Sad => {
                "It's okay to feel down sometimes. Remember that this feeling will pass."
            }
            Emotion::Anxious => {
                "Take deep breaths. Consider what specific steps might help ease your worries."
            }
            Emotion::Excited => {
                "Your enthusiasm is wonderful! Channel this energy into something meaningful."
            }
            Emotion::Angry => "Strong emotions can be signals. What might this anger be telling you?",
            Emotion::Content => "A beautiful state of peaceful satisfaction. Savor these moments.",
            Emotion::Neutral => "A balanced emotional state. Sometimes neutral is exactly what we need.",
            Emotion::Mixed => "Every emotion is valid and part of your human experience.",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "happy" | "joy" => Emotion::Happy,
            "sad" | "sadness" => Emotion::Sad,
            "anxious" | "fear" => Emotion::Anxious,
            "excited" | "surprise" => Emotion::Excited,
            "angry" | "anger" | "disgust" => Emotion::Angry,
            "content" => Emotion::Content,
            "neutral" => Emotion::Neutral,
            _ => Emotion::Mixed,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub text: String,
    pub emotion: Emotion,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub emotion: Emotion,
    pub score: f64,
    pub color: &'static str,
}

impl Classification {
    pub fn new(emotion: Emotion, score: f64) -> Self {
        Self {
            emotion,
            score,
            color: emotion.color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JournalRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub agree_terms: bool,
}

fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(value) => matches!(value.as_str(), "on" | "true" | "1" | "yes"),
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub avg: f64,
    pub count: usize,
    /// `min(count, 7)`; not a consecutive-day streak.
    pub streak: usize,
    pub top_emotion: Option<Emotion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: DashboardStats,
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub entry: JournalEntry,
    pub source: ClassificationSource,
    pub color: &'static str,
    pub message: &'static str,
    pub stats: DashboardStats,
}
