use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    database::{self, EntryWithResult, UserRow},
    emotion::{Emotion, MODEL_VERSION},
    error::AppError,
    insights::{self, EmotionCount, Insight, PeriodSummary, TrendSeries},
    state::AppState,
    user::{self, AuthUser, CsrfGuard, SESSION_COOKIE},
    utils::{self, CalendarDay, ExportRow},
};

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

// ---- accounts ----

#[derive(Deserialize)]
pub struct RegisterBody {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct UserInfo {
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
}

impl From<&UserRow> for UserInfo {
    fn from(user: &UserRow) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::InvalidInput);
    }
    Ok(email)
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Form(body): Form<RegisterBody>,
) -> Result<Response, AppError> {
    let email = normalize_email(&body.email)?;
    let first_name = body.first_name.trim();
    let last_name = body.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() || body.password.is_empty() {
        return Err(AppError::InvalidInput);
    }

    if database::email_in_use(&state.pool, &email, None).await? {
        return Err(AppError::EmailTaken);
    }

    let password_hash = user::hash_password(&body.password);
    let user_id =
        database::create_user(&state.pool, &email, first_name, last_name, &password_hash).await?;
    info!("Account created for {email}");

    let user = database::user_by_email(&state.pool, &email)
        .await?
        .ok_or(AppError::NotFound)?;
    let (session, csrf) = user::start_session(&state, user_id).await?;

    Ok((
        AppendHeaders([(SET_COOKIE, session), (SET_COOKIE, csrf)]),
        Json(UserInfo::from(&user)),
    )
        .into_response())
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(body): Form<LoginBody>,
) -> Result<Response, AppError> {
    let email = normalize_email(&body.email).map_err(|_| AppError::BadCredentials)?;

    let user = database::user_by_email(&state.pool, &email)
        .await?
        .ok_or(AppError::BadCredentials)?;
    if !user::verify_password(&body.password, &user.password_hash) {
        return Err(AppError::BadCredentials);
    }

    let (session, csrf) = user::start_session(&state, user.id).await?;
    Ok((
        AppendHeaders([(SET_COOKIE, session), (SET_COOKIE, csrf)]),
        Json(UserInfo::from(&user)),
    )
        .into_response())
}

pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    _csrf: CsrfGuard,
    headers: axum::http::HeaderMap,
) -> Result<Response, AppError> {
    if let Some(token) = user::cookie_value(&headers, SESSION_COOKIE) {
        database::delete_session(&state.pool, &token).await?;
    }

    Ok((
        AppendHeaders([
            (SET_COOKIE, user::expired_cookie(SESSION_COOKIE)),
            (SET_COOKIE, user::expired_cookie(user::CSRF_COOKIE)),
        ]),
        Json(json!({ "logged_out": true })),
    )
        .into_response())
}

// ---- dashboard ----

#[derive(Serialize)]
pub struct DashboardResponse {
    total_entries: usize,
    positive_ratio: f64,
    streak: u32,
    month: String,
    year: String,
    weeks: Vec<Vec<CalendarDay>>,
    emotion_counts: Vec<EmotionCount>,
}

pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let entries = database::entries_filtered(&state.pool, user.id, None, None, None).await?;
    let today = Local::now().date_naive();

    let total_entries = entries.len();
    let emotions: Vec<Emotion> = entries
        .iter()
        .filter_map(|e| e.emotion.as_deref().and_then(Emotion::parse))
        .collect();

    let positive = emotions.iter().filter(|e| e.is_positive()).count();
    let positive_ratio = if total_entries > 0 {
        (positive as f64 * 1000.0 / total_entries as f64).round() / 10.0
    } else {
        0.0
    };

    let entry_dates: Vec<NaiveDate> = entries.iter().map(|e| local_date(e.created_at)).collect();
    let streak = utils::journal_streak(&entry_dates, today);

    // Newest first, so the latest entry of each day marks the calendar.
    let day_emotions: Vec<(NaiveDate, Option<Emotion>)> = entries
        .iter()
        .map(|e| {
            (
                local_date(e.created_at),
                e.emotion.as_deref().and_then(Emotion::parse),
            )
        })
        .collect();
    let (weeks, heading) = utils::month_calendar(&day_emotions, today);
    let (month, year) = heading.split_once(' ').unwrap_or(("", ""));

    Ok(Json(DashboardResponse {
        total_entries,
        positive_ratio,
        streak,
        month: month.to_string(),
        year: year.to_string(),
        weeks,
        emotion_counts: insights::emotion_counts(&emotions),
    }))
}

// ---- journal & prediction ----

#[derive(Deserialize)]
pub struct JournalBody {
    content: String,
}

#[derive(Serialize)]
pub struct PredictResponse {
    emotion: &'static str,
    display: &'static str,
    confidence: f64,
    message: &'static str,
}

async fn analyze_entry(
    state: &AppState,
    user_id: i64,
    content: &str,
) -> Result<(i64, Emotion, f64), AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::InvalidInput);
    }

    let entry_id = database::insert_entry(&state.pool, user_id, content).await?;
    let prediction = state.classifier.predict(content);
    database::insert_result(
        &state.pool,
        entry_id,
        prediction.emotion.as_str(),
        prediction.confidence,
        MODEL_VERSION,
    )
    .await?;

    Ok((entry_id, prediction.emotion, prediction.confidence))
}

pub async fn journal_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    _csrf: CsrfGuard,
    Form(body): Form<JournalBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (entry_id, emotion, _) = analyze_entry(&state, user.id, &body.content).await?;
    Ok(Json(json!({ "entry_id": entry_id, "emotion": emotion.as_str() })))
}

pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    _csrf: CsrfGuard,
    Form(body): Form<JournalBody>,
) -> Result<Json<PredictResponse>, AppError> {
    let (_, emotion, confidence) = analyze_entry(&state, user.id, &body.content).await?;

    Ok(Json(PredictResponse {
        emotion: emotion.as_str(),
        display: emotion.display(),
        confidence: percent(confidence),
        message: emotion.supportive_message(),
    }))
}

// ---- results ----

#[derive(Serialize)]
pub struct ResultsResponse {
    entry_id: i64,
    content: String,
    created_at: DateTime<Utc>,
    emotion: String,
    display: &'static str,
    confidence: f64,
    radar_labels: Vec<&'static str>,
    radar_values: Vec<i64>,
    suggestion: &'static str,
}

pub async fn results_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(entry_id): Path<i64>,
) -> Result<Json<ResultsResponse>, AppError> {
    let entry = database::entry_with_result(&state.pool, entry_id, user.id)
        .await?
        .ok_or(AppError::NotFound)?;

    let label = entry.emotion.clone().ok_or(AppError::NotFound)?;
    let emotion = Emotion::parse(&label).ok_or(AppError::NotFound)?;
    let confidence = entry.confidence.unwrap_or(0.0);

    // Flat baseline with the predicted label pushed out.
    let radar_values: Vec<i64> = Emotion::ALL
        .iter()
        .map(|&e| {
            if e == emotion {
                ((confidence * 100.0) as i64).max(25)
            } else {
                12
            }
        })
        .collect();

    Ok(Json(ResultsResponse {
        entry_id: entry.id,
        content: entry.content,
        created_at: entry.created_at,
        emotion: label,
        display: emotion.display(),
        confidence: percent(confidence),
        radar_labels: Emotion::ALL.iter().map(|e| e.as_str()).collect(),
        radar_values,
        suggestion: emotion.suggestion(),
    }))
}

// ---- insights ----

#[derive(Serialize)]
pub struct InsightsResponse {
    total_entries: usize,
    emotion_counts: Vec<EmotionCount>,
    dominant_emotion: &'static str,
    positive_ratio: f64,
    trend_direction: &'static str,
    volatility: f64,
    pattern_summary: &'static str,
    ai_tip: &'static str,
    trend: TrendSeries,
    weekly_summary: PeriodSummary,
    monthly_summary: PeriodSummary,
    pattern_insights: Vec<String>,
}

pub async fn insights_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<InsightsResponse>, AppError> {
    let results: Vec<(DateTime<Utc>, Emotion)> =
        database::results_chronological(&state.pool, user.id)
            .await?
            .into_iter()
            .filter_map(|(at, label)| Emotion::parse(&label).map(|e| (at, e)))
            .collect();

    let chronological: Vec<Emotion> = results.iter().map(|(_, e)| *e).collect();
    let mut recent_first = chronological.clone();
    recent_first.reverse();

    let emotion_counts = insights::emotion_counts(&chronological);
    let dominant = emotion_counts
        .first()
        .and_then(|c| Emotion::parse(c.emotion))
        .unwrap_or(Emotion::Neutral);

    let positive_ratio = insights::positive_ratio(&chronological);
    let trend_direction = insights::detect_trend(&recent_first);
    let volatility = insights::volatility(&chronological);
    let Insight {
        summary,
        recommendation,
    } = insights::generate_insight(dominant, positive_ratio, volatility, trend_direction);

    let dated: Vec<(NaiveDate, Emotion)> = results
        .iter()
        .map(|(at, e)| (local_date(*at), *e))
        .collect();

    let now = Utc::now();
    Ok(Json(InsightsResponse {
        total_entries: results.len(),
        emotion_counts,
        dominant_emotion: dominant.as_str(),
        positive_ratio,
        trend_direction: trend_direction.as_str(),
        volatility,
        pattern_summary: summary,
        ai_tip: recommendation,
        trend: insights::trend_series(&dated),
        weekly_summary: insights::period_summary(&results, now, 7),
        monthly_summary: insights::period_summary(&results, now, 30),
        pattern_insights: insights::pattern_insights(&results, now),
    }))
}

// ---- history ----

#[derive(Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    emotion: String,
    #[serde(default)]
    date: String,
}

#[derive(Serialize)]
pub struct HistoryEntry {
    id: i64,
    content: String,
    created_at: DateTime<Utc>,
    emotion: Option<String>,
    display: Option<&'static str>,
    confidence: Option<f64>,
}

impl From<EntryWithResult> for HistoryEntry {
    fn from(entry: EntryWithResult) -> Self {
        let display = entry
            .emotion
            .as_deref()
            .and_then(Emotion::parse)
            .map(|e| e.display());
        Self {
            id: entry.id,
            content: entry.content,
            created_at: entry.created_at,
            emotion: entry.emotion,
            display,
            confidence: entry.confidence.map(percent),
        }
    }
}

#[derive(Serialize)]
pub struct HistoryResponse {
    entries: Vec<HistoryEntry>,
    q: String,
    emotion: String,
    date: String,
}

fn history_filters(q: &str, emotion: &str, date: &str) -> (Option<String>, Option<String>, Option<NaiveDate>) {
    let q = q.trim();
    let emotion = emotion.trim();
    // Unparseable dates drop the filter, matching the unfiltered fallback
    // of the page this feeds.
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok();

    (
        (!q.is_empty()).then(|| q.to_string()),
        (!emotion.is_empty()).then(|| emotion.to_string()),
        date,
    )
}

pub async fn history_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let (q, emotion, date) = history_filters(&query.q, &query.emotion, &query.date);

    let entries =
        database::entries_filtered(&state.pool, user.id, q.as_deref(), emotion.as_deref(), date)
            .await?;

    Ok(Json(HistoryResponse {
        entries: entries.into_iter().map(HistoryEntry::from).collect(),
        q: q.unwrap_or_default(),
        emotion: emotion.unwrap_or_default(),
        date: date.map(|d| d.to_string()).unwrap_or_default(),
    }))
}

#[derive(Deserialize)]
pub struct HistoryDeleteBody {
    entry_id: i64,
    #[serde(default)]
    q: String,
    #[serde(default)]
    emotion: String,
    #[serde(default)]
    date: String,
}

pub async fn history_delete_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    _csrf: CsrfGuard,
    Form(body): Form<HistoryDeleteBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = database::delete_entry(&state.pool, body.entry_id, user.id).await?;

    // Echo the active filters so the page can reload with them intact.
    Ok(Json(json!({
        "deleted": deleted,
        "q": body.q,
        "emotion": body.emotion,
        "date": body.date,
    })))
}

// ---- settings ----

#[derive(Serialize)]
pub struct SettingsResponse {
    profile: UserInfo,
    notifications_enabled: bool,
    dark_mode_enabled: bool,
}

pub async fn settings_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<SettingsResponse>, AppError> {
    let prefs = database::get_or_create_preferences(&state.pool, user.id).await?;
    Ok(Json(SettingsResponse {
        profile: UserInfo::from(&user),
        notifications_enabled: prefs.notifications_enabled,
        dark_mode_enabled: prefs.dark_mode_enabled,
    }))
}

fn default_action() -> String {
    "save".to_string()
}

#[derive(Deserialize)]
pub struct SettingsBody {
    #[serde(default = "default_action")]
    action: String,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    notifications_enabled: Option<bool>,
    dark_mode_enabled: Option<bool>,
}

pub async fn settings_update_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    _csrf: CsrfGuard,
    headers: axum::http::HeaderMap,
    Form(body): Form<SettingsBody>,
) -> Result<Response, AppError> {
    match body.action.as_str() {
        "export" => {
            let entries =
                database::entries_filtered(&state.pool, user.id, None, None, None).await?;
            let rows: Vec<ExportRow> = entries
                .into_iter()
                .map(|e| ExportRow {
                    created_at: e.created_at,
                    content: e.content,
                    emotion: e.emotion.as_deref().and_then(Emotion::parse),
                    confidence: e.confidence,
                })
                .collect();
            let csv = utils::entries_csv(&rows)?;

            Ok((
                [
                    (CONTENT_TYPE, "text/csv".to_string()),
                    (
                        CONTENT_DISPOSITION,
                        "attachment; filename=\"mindcheck_entries.csv\"".to_string(),
                    ),
                ],
                csv,
            )
                .into_response())
        }
        "delete_account" => {
            if let Some(token) = user::cookie_value(&headers, SESSION_COOKIE) {
                database::delete_session(&state.pool, &token).await?;
            }
            database::delete_user(&state.pool, user.id).await?;
            info!("Account deleted for {}", user.email);

            Ok((
                AppendHeaders([
                    (SET_COOKIE, user::expired_cookie(SESSION_COOKIE)),
                    (SET_COOKIE, user::expired_cookie(user::CSRF_COOKIE)),
                ]),
                Json(json!({ "deleted": true })),
            )
                .into_response())
        }
        _ => {
            let first_name = body.first_name.unwrap_or(user.first_name);
            let last_name = body.last_name.unwrap_or(user.last_name);
            let email = match body.email {
                Some(email) => {
                    let email = normalize_email(&email)?;
                    if database::email_in_use(&state.pool, &email, Some(user.id)).await? {
                        return Err(AppError::EmailTaken);
                    }
                    email
                }
                None => user.email,
            };
            database::update_profile(&state.pool, user.id, &first_name, &last_name, &email)
                .await?;

            let prefs = database::get_or_create_preferences(&state.pool, user.id).await?;
            database::update_preferences(
                &state.pool,
                user.id,
                body.notifications_enabled
                    .unwrap_or(prefs.notifications_enabled),
                body.dark_mode_enabled.unwrap_or(prefs.dark_mode_enabled),
            )
            .await?;

            Ok(Json(json!({ "saved": true })).into_response())
        }
    }
}

// ---- shared helpers ----

/// Confidence as a percentage, 2 d.p.
fn percent(confidence: f64) -> f64 {
    (confidence * 10_000.0).round() / 100.0
}

fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_to_two_places() {
        assert_eq!(percent(0.8234), 82.34);
        assert_eq!(percent(0.66666), 66.67);
        assert_eq!(percent(1.0), 100.0);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM ").unwrap(), "user@example.com");
        assert!(normalize_email("").is_err());
        assert!(normalize_email("not-an-email").is_err());
    }

    #[test]
    fn test_history_filters() {
        let (q, emotion, date) = history_filters(" happy ", "", "2026-08-07");
        assert_eq!(q.as_deref(), Some("happy"));
        assert_eq!(emotion, None);
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 8, 7));

        // Garbage dates drop the filter instead of erroring.
        let (_, _, date) = history_filters("", "joy_excitement", "not-a-date");
        assert_eq!(date, None);
    }

    mod api {
        use axum::{
            body::Body,
            http::{header, Request, StatusCode},
            Router,
        };
        use tower::ServiceExt;

        use crate::{
            config::Config, database::init_sqlite, emotion::EmotionClassifier, router,
            state::AppState,
        };
        use std::sync::Arc;

        async fn test_app() -> Router {
            let state = Arc::new(AppState {
                config: Config {
                    port: 0,
                    database_url: "sqlite::memory:".to_string(),
                    static_dir: "static".to_string(),
                    signing_key: b"test-signing-key".to_vec(),
                    session_ttl_days: 14,
                },
                pool: init_sqlite("sqlite::memory:").await,
                classifier: EmotionClassifier::default(),
            });
            router(state)
        }

        fn form_request(uri: &str, body: &str) -> Request<Body> {
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap()
        }

        /// Register and return `(cookie_header, csrf_token)` for follow-ups.
        async fn register(app: &Router) -> (String, String) {
            let response = app
                .clone()
                .oneshot(form_request(
                    "/api/register",
                    "first_name=Test&last_name=User&email=tester%40example.com&password=StrongPass123%21",
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let mut cookies = Vec::new();
            for value in response.headers().get_all(header::SET_COOKIE) {
                let pair = value.to_str().unwrap().split(';').next().unwrap();
                cookies.push(pair.to_string());
            }
            let cookie_header = cookies.join("; ");
            let csrf = cookies
                .iter()
                .find_map(|pair| pair.strip_prefix("csrftoken="))
                .expect("register sets a csrf cookie")
                .to_string();
            (cookie_header, csrf)
        }

        async fn json_body(response: axum::response::Response) -> serde_json::Value {
            let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
                .await
                .unwrap();
            serde_json::from_slice(&bytes).unwrap()
        }

        #[tokio::test]
        async fn test_predict_requires_login() {
            let app = test_app().await;
            let response = app
                .oneshot(form_request("/api/predict", "content=hello"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn test_predict_requires_csrf_header() {
            let app = test_app().await;
            let (cookies, _) = register(&app).await;

            let mut request = form_request("/api/predict", "content=hello");
            request
                .headers_mut()
                .insert(header::COOKIE, cookies.parse().unwrap());

            let response = app.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }

        #[tokio::test]
        async fn test_predict_flow() {
            let app = test_app().await;
            let (cookies, csrf) = register(&app).await;

            let mut request = form_request(
                "/api/predict",
                "content=I+just+got+promoted+and+I+am+so+happy",
            );
            request
                .headers_mut()
                .insert(header::COOKIE, cookies.parse().unwrap());
            request
                .headers_mut()
                .insert("X-CSRFToken", csrf.parse().unwrap());

            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_body(response).await;
            assert_eq!(body["emotion"], "joy_excitement");
            assert_eq!(body["display"], "Joy & Excitement");
            assert!(body["confidence"].as_f64().unwrap() > 0.0);
            assert!(body["message"].as_str().unwrap().contains("energised"));

            // Blank content is rejected without creating anything.
            let mut request = form_request("/api/predict", "content=++");
            request
                .headers_mut()
                .insert(header::COOKIE, cookies.parse().unwrap());
            request
                .headers_mut()
                .insert("X-CSRFToken", csrf.parse().unwrap());
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = json_body(response).await;
            assert_eq!(body["error"], "Invalid input.");

            // The entry shows up in history.
            let mut request = Request::builder()
                .uri("/api/history")
                .body(Body::empty())
                .unwrap();
            request
                .headers_mut()
                .insert(header::COOKIE, cookies.parse().unwrap());
            let response = app.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            assert_eq!(body["entries"].as_array().unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_duplicate_registration_conflicts() {
            let app = test_app().await;
            register(&app).await;

            let response = app
                .oneshot(form_request(
                    "/api/register",
                    "first_name=Test&last_name=User&email=tester%40example.com&password=StrongPass123%21",
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CONFLICT);
        }

        #[tokio::test]
        async fn test_login_rejects_wrong_password() {
            let app = test_app().await;
            register(&app).await;

            let response = app
                .clone()
                .oneshot(form_request(
                    "/api/login",
                    "email=tester%40example.com&password=wrong",
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let response = app
                .oneshot(form_request(
                    "/api/login",
                    "email=tester%40example.com&password=StrongPass123%21",
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
