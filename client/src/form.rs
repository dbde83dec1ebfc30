//! The journal submission form: textarea auto-grow, loading state, and the
//! submit flow against the prediction endpoint.
//!
//! Submission walks `Idle -> Submitting -> Idle`, producing a
//! [`ResultPanel`] on completion. Success and failure share one rendering
//! path ([`render_outcome`]) so both arms stay symmetric. A second submit
//! while one is in flight is not guarded against; the last response to
//! arrive wins the panel, exactly like the page it models.

use crate::cookies::cookie_value;
use crate::error::ClientError;
use crate::transport::{PredictionResult, Transport};

pub const CSRF_COOKIE: &str = "csrftoken";

/// Fixed failure rendering; the response body is never inspected.
pub const FAILURE_TITLE: &str = "Something went wrong";
pub const FAILURE_MESSAGE: &str = "Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// What the result area of the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub emotion: String,
    pub confidence: String,
    pub message: String,
    pub visible: bool,
}

impl ResultPanel {
    pub fn hidden() -> Self {
        Self {
            emotion: String::new(),
            confidence: String::new(),
            message: String::new(),
            visible: false,
        }
    }
}

/// Map a completed request onto the panel. One function for both arms keeps
/// the success and failure renderings in lockstep.
pub fn render_outcome(outcome: Result<PredictionResult, ClientError>) -> ResultPanel {
    match outcome {
        Ok(prediction) => ResultPanel {
            emotion: prediction.emotion,
            confidence: format!("Confidence: {}%", prediction.confidence),
            message: prediction.message,
            visible: true,
        },
        Err(_) => ResultPanel {
            emotion: FAILURE_TITLE.to_string(),
            confidence: String::new(),
            message: FAILURE_MESSAGE.to_string(),
            visible: true,
        },
    }
}

/// Grow-to-fit textarea model: visible height tracks content height.
#[derive(Debug, Default)]
pub struct Textarea {
    height: u32,
}

impl Textarea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the auto-grow step for one input event (or once at init).
    pub fn autosize(&mut self, scroll_height: u32) {
        self.height = scroll_height;
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

pub struct PredictForm<T: Transport> {
    url: String,
    transport: T,
    state: SubmitState,
    loading: bool,
}

impl<T: Transport> PredictForm<T> {
    /// `url` comes from the form element's `data-url` attribute.
    pub fn new(url: impl Into<String>, transport: T) -> Self {
        Self {
            url: url.into(),
            transport,
            state: SubmitState::Idle,
            loading: false,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Handle a form submission. Whitespace-only content aborts silently
    /// with no request; otherwise the content is posted with the CSRF token
    /// read from `cookies` (empty when absent — the server rejects then)
    /// and the completed outcome is rendered into a panel.
    pub async fn submit(&mut self, text: &str, cookies: &str) -> Option<ResultPanel> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }

        self.state = SubmitState::Submitting;
        self.loading = true;

        let token = cookie_value(cookies, CSRF_COOKIE).unwrap_or_default();
        let outcome = self.transport.predict(&self.url, content, &token).await;

        self.loading = false;
        self.state = SubmitState::Idle;

        Some(render_outcome(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct Call {
        url: String,
        content: String,
        csrf_token: String,
    }

    struct MockTransport {
        calls: Mutex<Vec<Call>>,
        response: fn() -> Result<PredictionResult, ClientError>,
    }

    impl MockTransport {
        fn new(response: fn() -> Result<PredictionResult, ClientError>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                response,
            }
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn predict(
            &self,
            url: &str,
            content: &str,
            csrf_token: &str,
        ) -> Result<PredictionResult, ClientError> {
            self.calls.lock().unwrap().push(Call {
                url: url.to_string(),
                content: content.to_string(),
                csrf_token: csrf_token.to_string(),
            });
            (self.response)()
        }
    }

    fn sad_prediction() -> Result<PredictionResult, ClientError> {
        Ok(PredictionResult {
            emotion: "Sadness".to_string(),
            confidence: 82.0,
            message: "Consider journaling tomorrow.".to_string(),
        })
    }

    #[tokio::test]
    async fn test_empty_submission_sends_nothing() {
        let mut form = PredictForm::new("/api/predict", MockTransport::new(sad_prediction));

        assert_eq!(form.submit("", "csrftoken=tok").await, None);
        assert_eq!(form.submit("   \n\t ", "csrftoken=tok").await, None);

        assert!(form.transport.calls.lock().unwrap().is_empty());
        assert_eq!(form.state(), SubmitState::Idle);
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_successful_submission_renders_result() {
        let mut form = PredictForm::new("/api/predict", MockTransport::new(sad_prediction));

        let panel = form
            .submit("  rough week overall  ", "sessionid=s; csrftoken=tok123")
            .await
            .unwrap();

        assert_eq!(panel.emotion, "Sadness");
        assert_eq!(panel.confidence, "Confidence: 82%");
        assert_eq!(panel.message, "Consider journaling tomorrow.");
        assert!(panel.visible);

        assert!(!form.is_loading());
        assert_eq!(form.state(), SubmitState::Idle);

        let calls = form.transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "/api/predict");
        // Content is trimmed before posting.
        assert_eq!(calls[0].content, "rough week overall");
        assert_eq!(calls[0].csrf_token, "tok123");
    }

    #[tokio::test]
    async fn test_missing_csrf_cookie_sends_empty_token() {
        let mut form = PredictForm::new("/api/predict", MockTransport::new(sad_prediction));
        form.submit("some text", "").await.unwrap();

        let calls = form.transport.calls.lock().unwrap();
        assert_eq!(calls[0].csrf_token, "");
    }

    #[tokio::test]
    async fn test_failure_renders_fixed_panel() {
        let mut form = PredictForm::new("/api/predict", MockTransport::new(|| {
            Err(ClientError::Http(500))
        }));

        let panel = form.submit("anything", "csrftoken=tok").await.unwrap();

        assert_eq!(panel.emotion, FAILURE_TITLE);
        assert_eq!(panel.confidence, "");
        assert_eq!(panel.message, FAILURE_MESSAGE);
        assert!(panel.visible);
        assert!(!form.is_loading());
    }

    #[test]
    fn test_render_is_symmetric() {
        let ok = render_outcome(sad_prediction());
        let err = render_outcome(Err(ClientError::Http(502)));
        assert!(ok.visible && err.visible);
        assert_ne!(ok, err);
    }

    #[test]
    fn test_textarea_tracks_content_height() {
        let mut textarea = Textarea::new();
        textarea.autosize(120);
        assert_eq!(textarea.height(), 120);

        // Grows with content and shrinks back when content is deleted.
        textarea.autosize(300);
        assert_eq!(textarea.height(), 300);
        textarea.autosize(80);
        assert_eq!(textarea.height(), 80);
        assert!(textarea.height() >= 80);
    }
}
