use crate::errors::GatewayError;
use crate::models::{Classification, Emotion, LoginResponse, SignupResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RequestOptions<'a> {
    pub method: Method,
    pub body: Option<Value>,
    pub token: Option<&'a str>,
}

impl RequestOptions<'_> {
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            token: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteGateway {
    client: Client,
    base_url: String,
}

impl RemoteGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn request(&self, path: &str, options: RequestOptions<'_>) -> Result<Value, GatewayError> {
        let mut builder = self
            .client
            .request(options.method, format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = options.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = options.body {
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .unwrap_or_else(|_| Value::Object(Map::new()));

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
            return Err(GatewayError::RequestFailed(message));
        }

        Ok(body)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GatewayError> {
        let body = self
            .request("/login", RequestOptions::post(json!({ "email": email, "password": password })))
            .await?;
        decode(body)
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, GatewayError> {
        let body = self
            .request(
                "/signup",
                RequestOptions::post(json!({ "name": name, "email": email, "password": password })),
            )
            .await?;
        decode(body)
    }

    pub async fn classify(
        &self,
        text: &str,
        email: &str,
        token: &str,
    ) -> Result<Classification, GatewayError> {
        let options = RequestOptions {
            token: Some(token),
            ..RequestOptions::post(json!({ "text": text, "email": email }))
        };
        let body = self.request("/journals", options).await?;
        let RemoteJournal { entry } = decode(body)?;
        let entry = entry.ok_or_else(malformed)?;
        let score = entry.score.ok_or_else(malformed)?;
        let emotion = entry
            .emotion
            .as_deref()
            .map(Emotion::from_label)
            .unwrap_or(Emotion::Neutral);
        Ok(Classification::new(emotion, f64::from(normalize_score(score))))
    }
}

#[derive(Debug, Deserialize)]
struct RemoteJournal {
    entry: Option<RemoteEntry>,
}

#[derive(Debug, Deserialize)]
struct RemoteEntry {
    emotion: Option<String>,
    score: Option<f64>,
}

fn malformed() -> GatewayError {
    GatewayError::RequestFailed("Malformed classification response".to_string())
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, GatewayError> {
    serde_json::from_value(body).map_err(|_| malformed_body())
}

fn malformed_body() -> GatewayError {
    GatewayError::RequestFailed("Malformed response".to_string())
}

/// Scores above 1 are already percentages; anything else is a fraction.
pub fn normalize_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    let percent = if raw > 1.0 { raw.round() } else { (raw * 100.0).round() };
    percent.clamp(0.0, 100.0) as u8
}
