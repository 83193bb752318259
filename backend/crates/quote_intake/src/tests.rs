//! Endpoint tests for the quote intake crate
//!
//! Drive the real router with an in-memory mailer and a manual clock.

#[cfg(test)]
mod endpoint_tests {
    use crate::application::config::{MailSettings, QuoteConfig};
    use crate::domain::mailer::{
        MailError, MailTimeouts, OutgoingMail, QuoteMailer, SmtpEndpoint,
    };
    use crate::presentation::handlers::QuoteAppState;
    use crate::presentation::router::quote_router_generic;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use platform::clock::{Clock, ManualClock};
    use platform::rate_limit::InMemoryRateLimiter;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::ServiceExt;

    const T0: i64 = 1_700_000_000_000;
    const CLIENT: &str = "203.0.113.7";

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Behavior {
        Accept,
        Reject,
        Stall,
    }

    /// Mailer that records every delivery instead of sending it
    struct RecordingMailer {
        behavior: Behavior,
        sent: Mutex<Vec<(SmtpEndpoint, OutgoingMail)>>,
    }

    impl RecordingMailer {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<(SmtpEndpoint, OutgoingMail)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl QuoteMailer for RecordingMailer {
        async fn send(&self, endpoint: &SmtpEndpoint, mail: &OutgoingMail) -> Result<(), MailError> {
            match self.behavior {
                Behavior::Accept => {
                    self.sent
                        .lock()
                        .unwrap()
                        .push((endpoint.clone(), mail.clone()));
                    Ok(())
                }
                Behavior::Reject => Err(MailError::Transport("535 authentication failed".into())),
                Behavior::Stall => std::future::pending().await,
            }
        }
    }

    fn mail_settings() -> MailSettings {
        MailSettings {
            host: Some("smtp.example.com".to_string()),
            port: Some(587),
            username: Some("mailer".to_string()),
            password: Some("secret".to_string()),
            to: Some("dispatch@example.com".to_string()),
            from: Some("web@example.com".to_string()),
        }
    }

    fn config() -> QuoteConfig {
        QuoteConfig {
            mail: mail_settings(),
            ..Default::default()
        }
    }

    struct Harness {
        router: Router,
        mailer: Arc<RecordingMailer>,
        clock: Arc<ManualClock>,
    }

    fn harness_with(config: QuoteConfig, behavior: Behavior) -> Harness {
        let mailer = Arc::new(RecordingMailer::new(behavior));
        let clock = Arc::new(ManualClock::new(T0));
        let state = QuoteAppState {
            rate_limiter: Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())),
            mailer: Arc::clone(&mailer),
            clock: Arc::clone(&clock) as Arc<dyn Clock>,
            config: Arc::new(config),
        };

        Harness {
            router: Router::new().nest("/api", quote_router_generic(state)),
            mailer,
            clock,
        }
    }

    fn harness() -> Harness {
        harness_with(config(), Behavior::Accept)
    }

    fn valid_body() -> Value {
        json!({
            "name": "Ana",
            "phone": "+34600000000",
            "email": "ana@example.com",
            "pickup": "Airport T1",
            "dropoff": "Hotel X",
            "company": ""
        })
    }

    fn with(mut body: Value, key: &str, value: Value) -> Value {
        body[key] = value;
        body
    }

    async fn post_raw(router: &Router, body: impl Into<Body>, client: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri("/api/quote")
            .header("content-type", "application/json");
        if let Some(client) = client {
            request = request.header("x-forwarded-for", client);
        }

        let response = router
            .clone()
            .oneshot(request.body(body.into()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(router: &Router, body: &Value, client: &str) -> (StatusCode, Value) {
        post_raw(router, body.to_string(), Some(client)).await
    }

    fn rejected(code: &str) -> Value {
        json!({ "ok": false, "error": code })
    }

    #[tokio::test]
    async fn test_valid_submission_is_delivered() {
        let h = harness();

        let (status, body) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        let (endpoint, mail) = &sent[0];
        assert_eq!(endpoint.host, "smtp.example.com");
        assert_eq!(endpoint.port, 587);
        assert_eq!(mail.from_name, "Royal Taxi BCN");
        assert_eq!(mail.from_address, "web@example.com");
        assert_eq!(mail.to, "dispatch@example.com");
        assert_eq!(mail.reply_to.as_deref(), Some("ana@example.com"));
        assert_eq!(mail.subject, "New Quote Request — RoyalTaxiBCN");
        assert!(mail.text_body.contains("Pickup: Airport T1"));
        assert!(mail.text_body.contains("Date: -"));
        assert!(mail.text_body.contains("IP: 203.0.113.7"));
        assert!(mail.html_body.contains("Airport T1"));
    }

    #[tokio::test]
    async fn test_invalid_email_sends_nothing() {
        let h = harness();
        let body = with(valid_body(), "email", json!("not-an-email"));

        let (status, body) = post(&h.router, &body, CLIENT).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, rejected("invalid_email"));
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_emails_are_rejected() {
        let h = harness();
        let emails = ["ana.example.com", "ana@example", "ana @example.com", "ana@ example.com"];

        for (i, email) in emails.into_iter().enumerate() {
            let body = with(valid_body(), "email", json!(email));
            let (status, body) = post(&h.router, &body, &format!("10.0.1.{i}")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
            assert_eq!(body, rejected("invalid_email"), "{email}");
        }
    }

    #[tokio::test]
    async fn test_missing_required_field_is_validation_error() {
        let h = harness();

        for (i, field) in ["name", "phone", "email", "pickup", "dropoff"]
            .into_iter()
            .enumerate()
        {
            let mut absent = valid_body();
            absent.as_object_mut().unwrap().remove(field);
            let (status, body) = post(&h.router, &absent, &format!("10.0.2.{i}")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{field} absent");
            assert_eq!(body, rejected("validation_error"), "{field} absent");

            let blank = with(valid_body(), field, json!("   "));
            let (status, body) = post(&h.router, &blank, &format!("10.0.3.{i}")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{field} blank");
            assert_eq!(body, rejected("validation_error"), "{field} blank");
        }
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_field_reported_before_bad_email() {
        let h = harness();
        let mut body = with(valid_body(), "email", json!("nope"));
        body.as_object_mut().unwrap().remove("dropoff");

        let (_, body) = post(&h.router, &body, CLIENT).await;
        assert_eq!(body, rejected("validation_error"));
    }

    #[tokio::test]
    async fn test_link_flood_is_spam() {
        let h = harness();
        let body = with(
            valid_body(),
            "message",
            json!("see HTTP://a.example and http://b.example or Https://c.example"),
        );

        let (status, body) = post(&h.router, &body, CLIENT).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, rejected("spam_detected"));
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_two_links_are_not_spam() {
        let h = harness();
        let body = with(valid_body(), "message", json!("http://a.example http://b.example"));

        let (status, _) = post(&h.router, &body, CLIENT).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_second_submission_within_window_is_rate_limited() {
        let h = harness();

        let (status, body) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        h.clock.advance_ms(2_000);
        let (status, body) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, rejected("rate_limited"));

        // Window counts from the accepted request
        h.clock.set_ms(T0 + 10_000);
        let (status, _) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(h.mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_clients_are_limited_independently() {
        let h = harness();

        assert_eq!(post(&h.router, &valid_body(), "198.51.100.1").await.0, StatusCode::OK);
        assert_eq!(post(&h.router, &valid_body(), "198.51.100.2").await.0, StatusCode::OK);
        assert_eq!(
            post(&h.router, &valid_body(), "198.51.100.1").await.0,
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn test_forwarded_list_uses_first_entry() {
        let h = harness();

        post(&h.router, &valid_body(), "198.51.100.9, 10.0.0.1").await;
        let (status, _) = post(&h.router, &valid_body(), "198.51.100.9 ,10.0.0.2").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(h.mailer.sent()[0].1.text_body.contains("IP: 198.51.100.9"));
    }

    #[tokio::test]
    async fn test_requests_without_forwarding_headers_share_one_slot() {
        let h = harness();

        let (status, _) = post_raw(&h.router, valid_body().to_string(), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(h.mailer.sent()[0].1.text_body.contains("IP: unknown"));

        let (status, _) = post_raw(&h.router, valid_body().to_string(), None).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_honeypot_reports_success_without_sending() {
        let h = harness();
        let body = json!({ "company": "ACME Corp", "email": "garbage" });

        let (status, body) = post(&h.router, &body, CLIENT).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_honeypot_is_not_filled() {
        let h = harness();
        let body = with(valid_body(), "company", json!("  "));

        let (status, _) = post(&h.router, &body, CLIENT).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(h.mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_runs_before_honeypot() {
        let h = harness();
        let bot = with(valid_body(), "company", json!("ACME Corp"));

        assert_eq!(post(&h.router, &bot, CLIENT).await.0, StatusCode::OK);
        let (status, body) = post(&h.router, &bot, CLIENT).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, rejected("rate_limited"));
    }

    #[tokio::test]
    async fn test_failed_validation_consumes_the_slot() {
        let h = harness();
        let invalid = with(valid_body(), "name", json!(""));

        assert_eq!(post(&h.router, &invalid, CLIENT).await.0, StatusCode::BAD_REQUEST);
        h.clock.advance_ms(1_000);
        let (status, body) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, rejected("rate_limited"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let h = harness();
        let payloads = ["{not json", "", "null", "[1,2]", "42", r#"{"name":5}"#];

        for payload in payloads {
            let (status, body) = post_raw(&h.router, payload, Some(CLIENT)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload:?}");
            assert_eq!(body, rejected("invalid_json"), "{payload:?}");
        }

        // Undecodable bodies never reach the limiter
        let (status, _) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_is_invalid_json() {
        let h = harness();
        let payload = format!(r#"{{"name":"{}"}}"#, "a".repeat(3 * 1024 * 1024));

        let (status, body) = post_raw(&h.router, payload, Some(CLIENT)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, rejected("invalid_json"));
        assert!(h.mailer.sent().is_empty());

        let (status, _) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unconfigured_relay() {
        let h = harness_with(QuoteConfig::default(), Behavior::Accept);

        let (status, body) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, rejected("smtp_not_configured"));
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_partially_configured_relay() {
        let mut config = config();
        config.mail.password = None;
        let h = harness_with(config, Behavior::Accept);

        let (_, body) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(body, rejected("smtp_not_configured"));
    }

    #[tokio::test]
    async fn test_input_errors_win_over_missing_configuration() {
        let h = harness_with(QuoteConfig::default(), Behavior::Accept);
        let body = with(valid_body(), "email", json!("nope"));

        let (_, body) = post(&h.router, &body, CLIENT).await;
        assert_eq!(body, rejected("invalid_email"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_smtp_error() {
        let h = harness_with(config(), Behavior::Reject);

        let (status, body) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        // Transport detail stays in the logs
        assert_eq!(body, rejected("smtp_error"));
    }

    #[tokio::test]
    async fn test_stalled_relay_times_out() {
        let config = QuoteConfig {
            timeouts: MailTimeouts {
                connect: Duration::from_millis(10),
                greeting: Duration::from_millis(10),
                socket: Duration::from_millis(10),
            },
            ..config()
        };
        let h = harness_with(config, Behavior::Stall);

        let (status, body) = post(&h.router, &valid_body(), CLIENT).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, rejected("smtp_error"));
    }

    #[tokio::test]
    async fn test_html_body_escapes_submitted_markup() {
        let h = harness();
        let body = with(
            valid_body(),
            "message",
            json!(r#"<script>alert("hi")</script> & 'x'"#),
        );

        post(&h.router, &body, CLIENT).await;
        let (_, mail) = &h.mailer.sent()[0];
        assert!(!mail.html_body.contains("<script>"));
        assert!(mail.html_body.contains(
            "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt; &amp; &#039;x&#039;"
        ));
        // Plain text carries the message as submitted
        assert!(mail.text_body.contains(r#"Message: <script>alert("hi")</script>"#));
    }

    #[tokio::test]
    async fn test_optional_fields_render_as_given() {
        let h = harness();
        let body = json!({
            "name": "  Ana  ",
            "phone": "+34600000000",
            "email": "ana@example.com",
            "pickup": "Airport T1",
            "dropoff": "Hotel X",
            "date": "2026-05-01",
            "time": "",
            "passengers": 3,
            "locale": "es"
        });

        post(&h.router, &body, CLIENT).await;
        let text = h.mailer.sent()[0].1.text_body.clone();
        assert!(text.starts_with("Locale: es\nName: Ana\n"));
        assert!(text.contains("Date: 2026-05-01"));
        assert!(text.contains("Time: -"));
        assert!(text.contains("Passengers: 3"));
        assert!(text.contains("Message: -"));
    }

    #[tokio::test]
    async fn test_concurrent_submissions_accept_exactly_one() {
        let h = harness();
        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let router = h.router.clone();
            tasks.spawn(async move { post(&router, &valid_body(), CLIENT).await.0 });
        }

        let statuses = tasks.join_all().await;
        let accepted = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        let limited = statuses
            .iter()
            .filter(|s| **s == StatusCode::TOO_MANY_REQUESTS)
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(limited, 7);
        assert_eq!(h.mailer.sent().len(), 1);
    }
}

#[cfg(test)]
mod use_case_tests {
    use crate::application::config::{MailSettings, QuoteConfig};
    use crate::application::submit_quote::{SubmitQuoteOutcome, SubmitQuoteUseCase};
    use crate::domain::mailer::{MailError, OutgoingMail, QuoteMailer, SmtpEndpoint};
    use crate::error::QuoteError;
    use kernel::rules::RequiredField;
    use platform::client::ClientAddress;
    use platform::clock::ManualClock;
    use platform::rate_limit::InMemoryRateLimiter;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingMailer {
        calls: AtomicUsize,
    }

    impl QuoteMailer for CountingMailer {
        async fn send(&self, _: &SmtpEndpoint, _: &OutgoingMail) -> Result<(), MailError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn use_case(mail: MailSettings) -> (SubmitQuoteUseCase<InMemoryRateLimiter, CountingMailer>, Arc<CountingMailer>) {
        let config = QuoteConfig {
            mail,
            ..Default::default()
        };
        let mailer = Arc::new(CountingMailer::default());
        let use_case = SubmitQuoteUseCase::new(
            Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())),
            Arc::clone(&mailer),
            Arc::new(ManualClock::new(0)),
            Arc::new(config),
        );
        (use_case, mailer)
    }

    fn complete() -> MailSettings {
        MailSettings {
            host: Some("smtp.example.com".to_string()),
            port: Some(465),
            username: Some("mailer".to_string()),
            password: Some("secret".to_string()),
            to: Some("dispatch@example.com".to_string()),
            from: Some("web@example.com".to_string()),
        }
    }

    const VALID: &[u8] = br#"{"name":"Ana","phone":"1","email":"ana@example.com","pickup":"A","dropoff":"B"}"#;

    #[tokio::test]
    async fn test_outcomes() {
        let (use_case, mailer) = use_case(complete());

        let outcome = use_case
            .execute(VALID, &ClientAddress::new("a"))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitQuoteOutcome::Delivered);

        let outcome = use_case
            .execute(br#"{"company":"bot"}"#, &ClientAddress::new("b"))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitQuoteOutcome::HoneypotDiscarded);
        assert_eq!(mailer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_variants_carry_details() {
        let (use_case, _) = use_case(MailSettings {
            to: None,
            ..complete()
        });

        let err = use_case
            .execute(br#"{"name":"Ana"}"#, &ClientAddress::new("a"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Validation(RequiredField::Phone)));

        let err = use_case
            .execute(VALID, &ClientAddress::new("a"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::RateLimited { retry_after_ms: 10_000 }));

        let err = use_case
            .execute(VALID, &ClientAddress::new("b"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::SmtpNotConfigured(ref missing) if missing == &["QUOTE_TO"]));
    }
}
