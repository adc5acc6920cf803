use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::models::{
    ChatReply, ChatRequest, CitizenGuidanceRequest, Coordinates, GuidanceKind,
    GuidanceResponse, HospitalGuidanceRequest, LoginRequest, LoginResponse, Role, WeatherSnapshot,
};
use crate::error::{ClimaError, ClimaResult};

pub const AI_TIMEOUT: Duration = Duration::from_secs(30);
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// How a single request failed before any endpoint-specific mapping.
#[derive(Debug)]
enum Transport {
    /// The request never produced a response.
    Network { connect: bool, timeout: bool, detail: String },
    Status(StatusCode),
    Decode(String),
}

impl Transport {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Transport::Decode(e.to_string());
        }
        if let Some(status) = e.status() {
            return Transport::Status(status);
        }
        Transport::Network {
            connect: e.is_connect(),
            timeout: e.is_timeout(),
            detail: e.to_string(),
        }
    }

    fn detail(&self) -> String {
        match self {
            Transport::Network { detail, .. } => detail.clone(),
            Transport::Status(status) => format!("HTTP {}", status),
            Transport::Decode(detail) => detail.clone(),
        }
    }
}

/// Thin client for the ClimaCare backend. Every call is a single attempt.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    weather_http: HttpClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ClimaResult<Self> {
        let build = |timeout: Duration| {
            HttpClient::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| ClimaError::Config(e.to_string()))
        };
        Ok(Self {
            http: build(AI_TIMEOUT)?,
            weather_http: build(WEATHER_TIMEOUT)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, http: &HttpClient, path: &str, body: &B) -> Result<R, Transport>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let endpoint = self.endpoint(path);
        debug!("POST {}", endpoint);
        let resp = http
            .post(&endpoint)
            .json(body)
            .send()
            .await
            .map_err(Transport::from_reqwest)?;
        if !resp.status().is_success() {
            return Err(Transport::Status(resp.status()));
        }
        resp.json::<R>().await.map_err(Transport::from_reqwest)
    }

    pub async fn login(&self, username: &str, password: &str) -> ClimaResult<Role> {
        let body = LoginRequest { username, password };
        match self.post_json::<_, LoginResponse>(&self.http, "/login", &body).await {
            Ok(resp) if resp.success => Ok(resp.role),
            Ok(_) => {
                warn!("login for {} answered without success", username);
                Err(ClimaError::Auth)
            }
            Err(e) => {
                warn!("login for {} failed: {}", username, e.detail());
                Err(ClimaError::Auth)
            }
        }
    }

    pub async fn fetch_weather(&self, coords: Coordinates) -> ClimaResult<WeatherSnapshot> {
        self.post_json(&self.weather_http, "/weather", &coords)
            .await
            .map_err(|e| {
                warn!("weather lookup at {},{} failed: {}", coords.lat, coords.lon, e.detail());
                ClimaError::WeatherUnavailable(e.detail())
            })
    }

    pub async fn fetch_guidance(&self, kind: &GuidanceKind, weather: &WeatherSnapshot) -> ClimaResult<String> {
        let result: Result<GuidanceResponse, Transport> = match kind {
            GuidanceKind::Citizen(profile) => {
                let body = CitizenGuidanceRequest { weather, profile };
                self.post_json(&self.http, "/citizen/ai", &body).await
            }
            GuidanceKind::Hospital => {
                let body = HospitalGuidanceRequest { weather };
                self.post_json(&self.http, "/hospital/ai", &body).await
            }
        };
        result.map(|r| r.response).map_err(|e| {
            warn!("{} guidance failed: {}", kind.role(), e.detail());
            ClimaError::GuidanceUnavailable(e.detail())
        })
    }

    pub async fn send_chat(
        &self,
        text: &str,
        weather: Option<&WeatherSnapshot>,
        location: Option<&str>,
    ) -> ClimaResult<String> {
        let body = ChatRequest { user_input: text, weather, location };
        match self.post_json::<_, ChatReply>(&self.http, "/chat", &body).await {
            Ok(reply) => Ok(reply.bot),
            Err(e) => {
                warn!("chat request failed: {}", e.detail());
                Err(self.chat_error(e))
            }
        }
    }

    fn chat_error(&self, e: Transport) -> ClimaError {
        match e {
            Transport::Network { connect: true, .. } => ClimaError::BackendUnreachable(self.base_url.clone()),
            Transport::Network { timeout: false, .. } => ClimaError::BackendUnreachable(self.base_url.clone()),
            Transport::Status(status) if status.is_server_error() => ClimaError::ServerError(status.as_u16()),
            Transport::Status(status) if status == StatusCode::UNPROCESSABLE_ENTITY => ClimaError::MalformedRequest,
            other => ClimaError::ChatFailed(other.detail()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/").unwrap()
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        assert_eq!(client().endpoint("/login"), "http://localhost:8000/login");
    }

    #[test]
    fn chat_errors_follow_transport_kind() {
        let c = client();
        let refused = Transport::Network { connect: true, timeout: false, detail: "refused".into() };
        assert!(matches!(c.chat_error(refused), ClimaError::BackendUnreachable(_)));

        let timed_out = Transport::Network { connect: false, timeout: true, detail: "timeout".into() };
        assert!(matches!(c.chat_error(timed_out), ClimaError::ChatFailed(_)));

        assert_eq!(c.chat_error(Transport::Status(StatusCode::BAD_GATEWAY)), ClimaError::ServerError(502));
        assert_eq!(
            c.chat_error(Transport::Status(StatusCode::UNPROCESSABLE_ENTITY)),
            ClimaError::MalformedRequest
        );
        assert!(matches!(
            c.chat_error(Transport::Status(StatusCode::NOT_FOUND)),
            ClimaError::ChatFailed(_)
        ));
        assert!(matches!(c.chat_error(Transport::Decode("eof".into())), ClimaError::ChatFailed(_)));
    }
}
