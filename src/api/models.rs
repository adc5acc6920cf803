use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Hospital,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Hospital => "hospital",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "citizen" => Some(Role::Citizen),
            "hospital" => Some(Role::Hospital),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions as reported by the backend. Temperatures are Celsius,
/// humidity is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub description: String,
    pub humidity: f64,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenProfile {
    pub age: u32,
    pub gender: String,
    pub food_preference: String,
    pub allergies: String,
    pub conditions: String,
}

impl CitizenProfile {
    /// Profile sent with every citizen guidance request until real profiles exist.
    pub fn demo() -> Self {
        Self {
            age: 30,
            gender: "Male".into(),
            food_preference: "Vegetarian".into(),
            allergies: "Dust, Pollen".into(),
            conditions: "Mild Asthma".into(),
        }
    }
}

/// Which AI endpoint a dashboard asks for guidance.
#[derive(Debug, Clone, PartialEq)]
pub enum GuidanceKind {
    Citizen(CitizenProfile),
    Hospital,
}

impl GuidanceKind {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Citizen => GuidanceKind::Citizen(CitizenProfile::demo()),
            Role::Hospital => GuidanceKind::Hospital,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            GuidanceKind::Citizen(_) => Role::Citizen,
            GuidanceKind::Hospital => Role::Hospital,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub role: Role,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct CitizenGuidanceRequest<'a> {
    pub weather: &'a WeatherSnapshot,
    pub profile: &'a CitizenProfile,
}

#[derive(Debug, Serialize)]
pub struct HospitalGuidanceRequest<'a> {
    pub weather: &'a WeatherSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct GuidanceResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub user_input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<&'a WeatherSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub bot: String,
}
