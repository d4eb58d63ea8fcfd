use crate::models::{LoginForm, SignupForm};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_NAME_CHARS: usize = 2;
pub const TERMS_NOT_AGREED: &str = "Please agree to the Terms & Conditions";

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

pub fn validate_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_CHARS
}

pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.push(Field::Email, "Email is required");
    } else if !validate_email(email) {
        errors.push(Field::Email, "Please enter a valid email address");
    }
}

pub fn validate_login(form: &LoginForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, &form.email);
    if form.password.trim().is_empty() {
        errors.push(Field::Password, "Password is required");
    }
    errors.into_result()
}

pub fn validate_signup(form: &SignupForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if form.name.trim().is_empty() {
        errors.push(Field::Name, "Full name is required");
    } else if !validate_name(&form.name) {
        errors.push(Field::Name, "Name must be at least 2 characters long");
    }

    check_email(&mut errors, &form.email);

    if form.password.trim().is_empty() {
        errors.push(Field::Password, "Password is required");
    } else if !validate_password(&form.password) {
        errors.push(Field::Password, "Password must be at least 6 characters long");
    }

    if form.confirm_password.trim().is_empty() {
        errors.push(Field::ConfirmPassword, "Please confirm your password");
    } else if !passwords_match(&form.password, &form.confirm_password) {
        errors.push(Field::ConfirmPassword, "Passwords do not match");
    }

    if !form.agree_terms {
        errors.push(Field::Form, TERMS_NOT_AGREED);
    }

    errors.into_result()
}
