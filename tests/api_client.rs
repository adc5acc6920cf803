use climacare::api::ApiClient;
use climacare::api::models::{Coordinates, GuidanceKind, Role, WeatherSnapshot};
use climacare::ClimaError;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: 38.0,
        feels_like: 41.0,
        condition: "Clear".into(),
        description: "clear sky".into(),
        humidity: 85.0,
        location: "Bengaluru".into(),
    }
}

async fn login_server() -> MockServer {
    let server = MockServer::start().await;
    for (user, pass, role) in [("citizen", "1234", "citizen"), ("hospital", "9999", "hospital")] {
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({ "username": user, "password": pass })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "role": role, "success": true })))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })))
        .mount(&server)
        .await;
    server
}

/// Address with nothing listening on it.
fn dead_backend() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

mod login {
    use super::*;

    #[tokio::test]
    async fn demo_accounts_get_their_roles() {
        let server = login_server().await;
        let api = ApiClient::new(&server.uri()).unwrap();
        assert_eq!(api.login("citizen", "1234").await, Ok(Role::Citizen));
        assert_eq!(api.login("hospital", "9999").await, Ok(Role::Hospital));
    }

    #[tokio::test]
    async fn anything_else_is_auth_error() {
        let server = login_server().await;
        let api = ApiClient::new(&server.uri()).unwrap();
        assert_eq!(api.login("citizen", "9999").await, Err(ClimaError::Auth));
        assert_eq!(api.login("admin", "admin").await, Err(ClimaError::Auth));
    }

    #[tokio::test]
    async fn unreachable_backend_is_still_auth_error() {
        let api = ApiClient::new(&dead_backend()).unwrap();
        assert_eq!(api.login("citizen", "1234").await, Err(ClimaError::Auth));
    }

    #[tokio::test]
    async fn unsuccessful_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "role": "citizen", "success": false })))
            .mount(&server)
            .await;
        let api = ApiClient::new(&server.uri()).unwrap();
        assert_eq!(api.login("citizen", "1234").await, Err(ClimaError::Auth));
    }
}

mod weather_and_guidance {
    use super::*;

    #[tokio::test]
    async fn weather_posts_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/weather"))
            .and(body_json(json!({ "lat": 12.9, "lon": 77.6 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "temperature": 38, "feels_like": 41, "condition": "Clear",
                "description": "clear sky", "humidity": 85, "location": "Bengaluru"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let weather = api.fetch_weather(Coordinates { lat: 12.9, lon: 77.6 }).await.unwrap();
        assert_eq!(weather, sample_weather());
    }

    #[tokio::test]
    async fn weather_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let err = api.fetch_weather(Coordinates { lat: 0.0, lon: 0.0 }).await.unwrap_err();
        assert!(matches!(err, ClimaError::WeatherUnavailable(_)));
    }

    #[tokio::test]
    async fn citizen_guidance_sends_profile() {
        let server = MockServer::start().await;
        let kind = GuidanceKind::for_role(Role::Citizen);
        let GuidanceKind::Citizen(profile) = &kind else {
            panic!("citizen kind expected");
        };
        Mock::given(method("POST"))
            .and(path("/citizen/ai"))
            .and(body_json(json!({ "weather": sample_weather(), "profile": profile })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Health Tips\n- rest" })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let text = api.fetch_guidance(&kind, &sample_weather()).await.unwrap();
        assert_eq!(text, "Health Tips\n- rest");
    }

    #[tokio::test]
    async fn hospital_guidance_sends_weather_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hospital/ai"))
            .and(body_json(json!({ "weather": sample_weather() })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Severity: High" })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let text = api.fetch_guidance(&GuidanceKind::Hospital, &sample_weather()).await.unwrap();
        assert_eq!(text, "Severity: High");
    }

    #[tokio::test]
    async fn guidance_failure_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hospital/ai"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let err = api.fetch_guidance(&GuidanceKind::Hospital, &sample_weather()).await.unwrap_err();
        assert!(matches!(err, ClimaError::GuidanceUnavailable(_)));
    }
}

mod chat {
    use super::*;

    async fn chat_server(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "bot": "Stay healthy! 🌟" })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn reply_text_is_returned_with_context_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({
                "user_input": "Can I run today?",
                "weather": sample_weather(),
                "location": "Bengaluru"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bot": "Run early." })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let weather = sample_weather();
        let reply = api.send_chat("Can I run today?", Some(&weather), Some("Bengaluru")).await;
        assert_eq!(reply, Ok("Run early.".to_string()));
    }

    #[tokio::test]
    async fn network_failure_is_backend_unreachable() {
        let api = ApiClient::new(&dead_backend()).unwrap();
        let err = api.send_chat("hello", None, None).await.unwrap_err();
        assert!(matches!(err, ClimaError::BackendUnreachable(_)), "{err:?}");
    }

    #[tokio::test]
    async fn status_422_is_malformed_request() {
        let server = chat_server(422).await;
        let api = ApiClient::new(&server.uri()).unwrap();
        assert_eq!(api.send_chat("hello", None, None).await, Err(ClimaError::MalformedRequest));
    }

    #[tokio::test]
    async fn status_500_is_server_error() {
        let server = chat_server(500).await;
        let api = ApiClient::new(&server.uri()).unwrap();
        assert_eq!(api.send_chat("hello", None, None).await, Err(ClimaError::ServerError(500)));
    }

    #[tokio::test]
    async fn other_statuses_are_generic() {
        let server = chat_server(404).await;
        let api = ApiClient::new(&server.uri()).unwrap();
        let err = api.send_chat("hello", None, None).await.unwrap_err();
        assert!(matches!(err, ClimaError::ChatFailed(_)));
    }
}
