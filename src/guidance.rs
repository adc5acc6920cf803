//! Splitting AI guidance text into display sections.
//!
//! The backend is prompted to answer with a fixed set of headed blocks. We
//! only need enough structure to put each block on its own card, so parsing
//! is a small state machine keyed on literal header phrases.

use std::fmt;

use crate::api::models::WeatherSnapshot;

/// A family of sections with the header phrases that open them.
pub trait SectionKind: Copy + Eq + 'static {
    /// Checked in order; the first phrase contained in a line wins.
    const HEADERS: &'static [(&'static str, Self)];

    fn recognize(line: &str) -> Option<Self> {
        Self::HEADERS
            .iter()
            .find(|(phrase, _)| line.contains(phrase))
            .map(|(_, kind)| *kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitizenSection {
    Weather,
    Health,
    Ayurvedic,
    Diet,
    Alerts,
}

impl SectionKind for CitizenSection {
    const HEADERS: &'static [(&'static str, Self)] = &[
        ("Weather Summary", CitizenSection::Weather),
        ("Health Tips", CitizenSection::Health),
        ("Ayurvedic Tips", CitizenSection::Ayurvedic),
        ("Diet Plan", CitizenSection::Diet),
        ("Allergy & Weather Alerts", CitizenSection::Alerts),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HospitalSection {
    RiskOverview,
    PatientSurges,
    StaffPlanning,
    Supplies,
    BedForecast,
    EmergencyReadiness,
}

impl SectionKind for HospitalSection {
    const HEADERS: &'static [(&'static str, Self)] = &[
        ("Weather Risk Overview", HospitalSection::RiskOverview),
        ("Predicted Patient Surges", HospitalSection::PatientSurges),
        ("Staff Planning", HospitalSection::StaffPlanning),
        ("Medicine & Supply Recommendations", HospitalSection::Supplies),
        ("ICU & Bed Forecast", HospitalSection::BedForecast),
        ("Emergency Readiness", HospitalSection::EmergencyReadiness),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor<K> {
    /// No header seen yet; content lines are dropped.
    Preamble,
    In(K),
}

/// Section bodies, each a newline-terminated run of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections<K: SectionKind> {
    bodies: Vec<(K, String)>,
}

impl<K: SectionKind> Sections<K> {
    pub fn parse(text: &str) -> Self {
        let mut bodies: Vec<(K, String)> =
            K::HEADERS.iter().map(|(_, kind)| (*kind, String::new())).collect();
        let mut cursor = Cursor::Preamble;

        for line in text.split('\n') {
            if let Some(kind) = K::recognize(line) {
                cursor = Cursor::In(kind);
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            if let Cursor::In(kind) = cursor {
                if let Some((_, body)) = bodies.iter_mut().find(|(k, _)| *k == kind) {
                    body.push_str(line);
                    body.push('\n');
                }
            }
        }

        Self { bodies }
    }

    /// Body of a section, empty when the text never mentioned it.
    pub fn get(&self, kind: K) -> &str {
        self.bodies
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, body)| body.as_str())
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.iter().all(|(_, body)| body.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Coarse hospital risk from raw conditions.
    pub fn from_weather(weather: &WeatherSnapshot) -> Self {
        if weather.temperature > 35.0 || weather.humidity > 80.0 {
            RiskLevel::High
        } else if weather.temperature < 5.0 || weather.humidity < 30.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Severity named in guidance text, most severe match first.
    pub fn from_guidance(text: &str) -> Self {
        if text.contains("Critical") {
            RiskLevel::Critical
        } else if text.contains("High") {
            RiskLevel::High
        } else if text.contains("Moderate") {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// libadwaita style class for badges.
    pub fn css_class(self) -> &'static str {
        match self {
            RiskLevel::Critical => "error",
            RiskLevel::High | RiskLevel::Moderate => "warning",
            RiskLevel::Low => "success",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        };
        f.write_str(label)
    }
}
