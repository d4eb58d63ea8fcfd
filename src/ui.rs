use crate::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::models::{ChartPoint, DashboardStats, JournalEntry, Session, Submission};
use crate::validate::{Field, FieldErrors};
use std::fmt::Write;

const PREVIEW_CHARS: usize = 100;

pub struct DashboardView<'a> {
    pub stats: &'a DashboardStats,
    pub recent: &'a [JournalEntry],
    pub chart: &'a [ChartPoint],
    pub last: Option<&'a Submission>,
    pub session: Option<&'a Session>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Clone, Default)]
pub struct AuthView {
    pub mode: AuthMode,
    pub errors: FieldErrors,
    pub notice: Option<String>,
    pub name: String,
    pub email: String,
}

pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let greeting = match view.session {
        Some(session) => format!("Signed in as {}", escape_html(&session.name)),
        None => r#"Writing offline. <a href="/auth">Sign in</a> to use the analysis service."#
            .to_string(),
    };
    let top = view
        .stats
        .top_emotion
        .map(|emotion| emotion.label())
        .unwrap_or("--");

    fill(
        DASHBOARD_HTML,
        &[
            ("STYLE", STYLE),
            ("GREETING", &greeting),
            ("AVG", &format!("{:.1}", view.stats.avg)),
            ("COUNT", &view.stats.count.to_string()),
            ("STREAK", &view.stats.streak.to_string()),
            ("TOP", top),
            ("RESULT", &render_result(view.last)),
            ("ENTRIES", &render_entries(view.recent)),
            ("CHART", &render_chart(view.chart)),
        ],
    )
}

// Substituted text is copied through as is and never scanned for further
// placeholders.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };
        let key = &after[..close];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

fn render_result(last: Option<&Submission>) -> String {
    let Some(submission) = last else {
        return String::new();
    };
    format!(
        r#"<div class="result" style="background-color: {color}"><strong>{emotion}: {score}%</strong><p>{message}</p></div>"#,
        color = submission.color,
        emotion = submission.entry.emotion,
        score = submission.entry.score,
        message = escape_html(submission.message),
    )
}

fn render_entries(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return r#"<p class="hint">No entries yet.</p>"#.to_string();
    }
    let mut html = String::new();
    for entry in entries {
        let _ = write!(
            html,
            r#"<div class="entry-item"><div class="entry-date">{date}</div><div class="entry-text">{text}</div><div class="entry-mood">{emotion}: {score}%</div></div>"#,
            date = entry.date.format("%b %d, %Y"),
            text = escape_html(&preview(&entry.text)),
            emotion = entry.emotion,
            score = entry.score,
        );
    }
    html
}

pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

// The y axis is fixed to 0..=100.
pub fn render_chart(points: &[ChartPoint]) -> String {
    const WIDTH: f64 = 600.0;
    const HEIGHT: f64 = 260.0;
    const PADDING_X: f64 = 44.0;
    const PADDING_Y: f64 = 34.0;
    const TOP: f64 = 24.0;

    if points.is_empty() {
        return r#"<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>"#
            .to_string();
    }

    let x_step = if points.len() > 1 {
        (WIDTH - PADDING_X * 2.0) / (points.len() - 1) as f64
    } else {
        0.0
    };
    let scale_y = (HEIGHT - TOP - PADDING_Y) / 100.0;
    let x = |index: usize| PADDING_X + index as f64 * x_step;
    let y = |value: f64| HEIGHT - PADDING_Y - value * scale_y;

    let mut svg = String::new();
    for tick in (0..=100).step_by(25) {
        let y_pos = y(f64::from(tick));
        let _ = write!(
            svg,
            r#"<line class="chart-grid" x1="{x1}" y1="{y_pos:.2}" x2="{x2}" y2="{y_pos:.2}" /><text class="chart-label" x="{lx}" y="{ly:.2}" text-anchor="end">{tick}</text>"#,
            x1 = PADDING_X,
            x2 = WIDTH - PADDING_X,
            lx = PADDING_X - 10.0,
            ly = y_pos + 4.0,
        );
    }

    let path: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let command = if index == 0 { 'M' } else { 'L' };
            format!("{command} {:.2} {:.2}", x(index), y(f64::from(point.score)))
        })
        .collect();
    let _ = write!(svg, r#"<path class="chart-line" d="{}" />"#, path.join(" "));

    let label_every = if points.len() > 8 { 2 } else { 1 };
    for (index, point) in points.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4" />"#,
            x(index),
            y(f64::from(point.score)),
        );
        if index % label_every == 0 {
            let label = point.label.get(5..).unwrap_or(&point.label);
            let _ = write!(
                svg,
                r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                x(index),
                HEIGHT - PADDING_Y + 18.0,
                escape_html(label),
            );
        }
    }
    svg
}

pub fn render_auth(view: &AuthView) -> String {
    let (login_class, signup_class) = match view.mode {
        AuthMode::Login => ("", " hidden"),
        AuthMode::Signup => (" hidden", ""),
    };
    let notice = view
        .notice
        .as_deref()
        .map(|notice| format!(r#"<div class="status ok">{}</div>"#, escape_html(notice)))
        .unwrap_or_default();
    let alert = view
        .errors
        .get(Field::Form)
        .map(|alert| format!(r#"<div class="status error">{}</div>"#, escape_html(alert)))
        .unwrap_or_default();

    let login_email = if view.mode == AuthMode::Login { view.email.as_str() } else { "" };
    let signup_email = if view.mode == AuthMode::Signup { view.email.as_str() } else { "" };
    let none = FieldErrors::default();
    let (login_errors, signup_errors) = match view.mode {
        AuthMode::Login => (&view.errors, &none),
        AuthMode::Signup => (&none, &view.errors),
    };

    fill(
        AUTH_HTML,
        &[
            ("STYLE", STYLE),
            ("NOTICE", &notice),
            ("ALERT", &alert),
            ("LOGIN_CLASS", login_class),
            ("SIGNUP_CLASS", signup_class),
            ("LOGIN_EMAIL", &escape_html(login_email)),
            ("LOGIN_EMAIL_ERROR", &field_error(login_errors, Field::Email)),
            ("LOGIN_PASSWORD_ERROR", &field_error(login_errors, Field::Password)),
            ("SIGNUP_NAME", &escape_html(&view.name)),
            ("SIGNUP_EMAIL", &escape_html(signup_email)),
            ("SIGNUP_NAME_ERROR", &field_error(signup_errors, Field::Name)),
            ("SIGNUP_EMAIL_ERROR", &field_error(signup_errors, Field::Email)),
            ("SIGNUP_PASSWORD_ERROR", &field_error(signup_errors, Field::Password)),
            ("SIGNUP_CONFIRM_ERROR", &field_error(signup_errors, Field::ConfirmPassword)),
            ("DEMO_EMAIL", DEMO_EMAIL),
            ("DEMO_PASSWORD", DEMO_PASSWORD),
        ],
    )
}

fn field_error(errors: &FieldErrors, field: Field) -> String {
    errors
        .get(field)
        .map(|message| format!(r#"<span class="error-message">{}</span>"#, escape_html(message)))
        .unwrap_or_default()
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef0fb;
      --bg-2: #c7cdf5;
      --ink: #2b2a28;
      --accent: #667eea;
      --accent-2: #764ba2;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(60, 72, 140, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e6e9ff 60%, #f4f2fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle, .hint {
      margin: 0;
      color: #5f5c57;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 16px 18px;
      display: grid;
      gap: 6px;
    }

    .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: #7a766f;
    }

    .value {
      font-size: 1.8rem;
      font-weight: 600;
    }

    textarea, input[type="text"], input[type="email"], input[type="password"] {
      width: 100%;
      border: 1px solid #d8d6f0;
      border-radius: 14px;
      padding: 12px 14px;
      font: inherit;
    }

    textarea {
      min-height: 120px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 26px;
      font: inherit;
      font-weight: 600;
      color: white;
      background: linear-gradient(135deg, var(--accent), var(--accent-2));
      cursor: pointer;
    }

    .result {
      color: white;
      border-radius: 18px;
      padding: 16px 18px;
    }

    .entry-item {
      background: white;
      border-radius: 14px;
      padding: 12px 16px;
      display: grid;
      gap: 4px;
    }

    .entry-date, .entry-mood {
      font-size: 0.85rem;
      color: #7a766f;
    }

    .chart-card {
      background: white;
      border-radius: 18px;
      padding: 12px;
    }

    .chart-grid {
      stroke: rgba(0, 0, 0, 0.1);
    }

    .chart-label {
      font-size: 11px;
      fill: #7a766f;
    }

    .chart-line {
      fill: none;
      stroke: rgb(102, 126, 234);
      stroke-width: 3;
    }

    .chart-point {
      fill: rgb(102, 126, 234);
    }

    .field {
      display: grid;
      gap: 6px;
      margin-bottom: 14px;
    }

    .error-message {
      color: #ef4444;
      font-size: 0.85rem;
    }

    .status {
      border-radius: 14px;
      padding: 10px 14px;
    }

    .status.ok {
      background: #d1fae5;
    }

    .status.error {
      background: #fee2e2;
    }

    .hidden {
      display: none;
    }

    @media (max-width: 640px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Journal</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Journal</h1>
      <p class="subtitle">{{GREETING}}</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Average mood</span>
        <span id="avg-mood" class="value">{{AVG}}</span>
      </div>
      <div class="stat">
        <span class="label">Entries</span>
        <span id="total-entries" class="value">{{COUNT}}</span>
      </div>
      <div class="stat">
        <span class="label">Streak</span>
        <span id="streak" class="value">{{STREAK}}</span>
      </div>
      <div class="stat">
        <span class="label">Top emotion</span>
        <span id="top-emotion" class="value">{{TOP}}</span>
      </div>
    </section>

    <section>
      <form id="journal-form" method="post" action="/journal">
        <div class="field">
          <label class="label" for="journal-entry">How are you feeling today?</label>
          <textarea id="journal-entry" name="text" required></textarea>
        </div>
        <button type="submit">Analyze my mood</button>
      </form>
    </section>

    {{RESULT}}

    <section class="chart-area">
      <h2>Mood over time</h2>
      <div class="chart-card">
        <svg id="mood-chart" viewBox="0 0 600 260" aria-label="Mood score chart" role="img">{{CHART}}</svg>
      </div>
    </section>

    <section>
      <h2>Recent entries</h2>
      <div id="entries-list" class="panel">{{ENTRIES}}</div>
    </section>

    <p class="hint"><a href="/premium">Go premium</a></p>
  </main>
</body>
</html>
"#;

const AUTH_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Journal - Sign in</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Journal</h1>
      <p class="subtitle">Track how you feel, one entry at a time.</p>
    </header>

    {{NOTICE}}
    {{ALERT}}

    <section id="login-form" class="{{LOGIN_CLASS}}">
      <h2>Welcome back</h2>
      <form method="post" action="/auth/login">
        <div class="field">
          <label class="label" for="login-email">Email</label>
          <input id="login-email" type="email" name="email" value="{{LOGIN_EMAIL}}" />
          {{LOGIN_EMAIL_ERROR}}
        </div>
        <div class="field">
          <label class="label" for="login-password">Password</label>
          <input id="login-password" type="password" name="password" />
          {{LOGIN_PASSWORD_ERROR}}
        </div>
        <button type="submit">Sign in</button>
      </form>
      <p class="hint">
        <a href="/auth/oauth/google">Continue with Google</a> ·
        <a href="/auth/oauth/facebook">Continue with Facebook</a>
      </p>
      <p class="hint"><a href="/auth?mode=signup">Create an account</a></p>
    </section>

    <section id="signup-form" class="{{SIGNUP_CLASS}}">
      <h2>Create your account</h2>
      <form method="post" action="/auth/signup">
        <div class="field">
          <label class="label" for="signup-name">Full name</label>
          <input id="signup-name" type="text" name="name" value="{{SIGNUP_NAME}}" />
          {{SIGNUP_NAME_ERROR}}
        </div>
        <div class="field">
          <label class="label" for="signup-email">Email</label>
          <input id="signup-email" type="email" name="email" value="{{SIGNUP_EMAIL}}" />
          {{SIGNUP_EMAIL_ERROR}}
        </div>
        <div class="field">
          <label class="label" for="signup-password">Password</label>
          <input id="signup-password" type="password" name="password" />
          {{SIGNUP_PASSWORD_ERROR}}
        </div>
        <div class="field">
          <label class="label" for="confirm-password">Confirm password</label>
          <input id="confirm-password" type="password" name="confirm_password" />
          {{SIGNUP_CONFIRM_ERROR}}
        </div>
        <div class="field">
          <label><input type="checkbox" name="agree_terms" /> I agree to the Terms &amp; Conditions</label>
        </div>
        <button type="submit">Create account</button>
      </form>
      <p class="hint"><a href="/auth">Already have an account? Sign in</a></p>
    </section>

    <p class="hint"><strong>Demo credentials:</strong> {{DEMO_EMAIL}} / {{DEMO_PASSWORD}}</p>
  </main>
</body>
</html>
"#;
