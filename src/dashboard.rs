//! Data behind a role dashboard: one location → weather → guidance cycle at
//! a time, with results from superseded cycles thrown away.

use log::{debug, info};

use crate::api::ApiClient;
use crate::api::models::{GuidanceKind, Role, WeatherSnapshot};
use crate::error::ClimaError;
use crate::location::{self, Locator};

pub const LOADING_GUIDANCE: &str = "Loading recommendations...";
pub const GUIDANCE_PLACEHOLDER: &str = "Recommendations are unavailable right now.";

/// Identifies one fetch cycle. Only the most recently issued ticket may
/// change the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// First cycle, nothing to show yet.
    Loading,
    /// A later cycle; previous data stays on screen.
    Refreshing,
    Ready,
    Failed(ClimaError),
}

/// What a finished cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Location or weather failed, so there is nothing to show.
    Failed(ClimaError),
    /// Weather arrived but guidance did not.
    GuidanceFailed { weather: WeatherSnapshot, error: ClimaError },
    Complete { weather: WeatherSnapshot, guidance: String },
}

/// Run one cycle. Each step starts only after the previous one succeeded.
pub async fn run_cycle(api: &ApiClient, locator: &dyn Locator, kind: &GuidanceKind) -> CycleOutcome {
    let coords = match location::acquire(locator).await {
        Ok(coords) => coords,
        Err(e) => return CycleOutcome::Failed(e),
    };
    debug!("{} cycle located at {},{}", kind.role(), coords.lat, coords.lon);

    let weather = match api.fetch_weather(coords).await {
        Ok(weather) => weather,
        Err(e) => return CycleOutcome::Failed(e),
    };

    match api.fetch_guidance(kind, &weather).await {
        Ok(guidance) => CycleOutcome::Complete { weather, guidance },
        Err(error) => CycleOutcome::GuidanceFailed { weather, error },
    }
}

#[derive(Debug, Clone)]
pub struct DashboardModel {
    kind: GuidanceKind,
    generation: u64,
    retired: bool,
    status: Status,
    weather: Option<WeatherSnapshot>,
    guidance: Option<String>,
}

impl DashboardModel {
    pub fn new(kind: GuidanceKind) -> Self {
        Self {
            kind,
            generation: 0,
            retired: false,
            status: Status::Loading,
            weather: None,
            guidance: None,
        }
    }

    pub fn for_role(role: Role) -> Self {
        Self::new(GuidanceKind::for_role(role))
    }

    pub fn kind(&self) -> &GuidanceKind {
        &self.kind
    }

    /// Start a cycle. Any cycle still in flight becomes stale.
    pub fn begin_cycle(&mut self) -> Ticket {
        self.generation += 1;
        self.status = if self.weather.is_some() {
            Status::Refreshing
        } else {
            Status::Loading
        };
        Ticket(self.generation)
    }

    /// Fold a finished cycle into the model. Returns false, leaving the model
    /// untouched, when the ticket is stale or the view is gone.
    pub fn apply(&mut self, ticket: Ticket, outcome: CycleOutcome) -> bool {
        if self.retired || ticket.0 != self.generation {
            debug!("dropping outcome of stale cycle {} (current {})", ticket.0, self.generation);
            return false;
        }
        match outcome {
            CycleOutcome::Failed(error) => {
                info!("{} dashboard failed: {}", self.kind.role(), error);
                self.weather = None;
                self.guidance = None;
                self.status = Status::Failed(error);
            }
            CycleOutcome::GuidanceFailed { weather, error } => {
                info!("{} guidance failed: {}", self.kind.role(), error);
                self.weather = Some(weather);
                self.guidance = None;
                self.status = Status::Failed(error);
            }
            CycleOutcome::Complete { weather, guidance } => {
                self.weather = Some(weather);
                self.guidance = Some(guidance);
                self.status = Status::Ready;
            }
        }
        true
    }

    /// Called when the view is unmounted; later outcomes are ignored.
    pub fn retire(&mut self) {
        self.retired = true;
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.status, Status::Loading | Status::Refreshing)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn guidance(&self) -> Option<&str> {
        self.guidance.as_deref()
    }

    /// Text for the guidance card in every state.
    pub fn guidance_text(&self) -> &str {
        match (&self.guidance, &self.status) {
            (Some(text), _) => text.as_str(),
            (None, Status::Loading | Status::Refreshing) => LOADING_GUIDANCE,
            (None, _) => GUIDANCE_PLACEHOLDER,
        }
    }

    pub fn error(&self) -> Option<&ClimaError> {
        match &self.status {
            Status::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(temperature: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature,
            feels_like: temperature + 3.0,
            condition: "Clear".into(),
            description: "clear sky".into(),
            humidity: 85.0,
            location: "Bengaluru".into(),
        }
    }

    fn complete(temperature: f64, guidance: &str) -> CycleOutcome {
        CycleOutcome::Complete { weather: weather(temperature), guidance: guidance.into() }
    }

    #[test]
    fn first_cycle_loads_then_ready() {
        let mut model = DashboardModel::for_role(Role::Citizen);
        let ticket = model.begin_cycle();
        assert_eq!(model.status(), &Status::Loading);
        assert_eq!(model.guidance_text(), LOADING_GUIDANCE);

        assert!(model.apply(ticket, complete(38.0, "Diet Plan\nDrink water\n")));
        assert_eq!(model.status(), &Status::Ready);
        assert_eq!(model.weather().map(|w| w.temperature), Some(38.0));
        assert!(!model.is_busy());
    }

    #[test]
    fn refresh_keeps_data_visible() {
        let mut model = DashboardModel::for_role(Role::Hospital);
        let t1 = model.begin_cycle();
        model.apply(t1, complete(30.0, "ok"));
        model.begin_cycle();
        assert_eq!(model.status(), &Status::Refreshing);
        assert_eq!(model.guidance(), Some("ok"));
    }

    #[test]
    fn stale_cycles_are_discarded() {
        let mut model = DashboardModel::for_role(Role::Citizen);
        let older = model.begin_cycle();
        let newer = model.begin_cycle();

        assert!(model.apply(newer, complete(20.0, "new")));
        assert!(!model.apply(older, complete(10.0, "old")));
        assert_eq!(model.guidance(), Some("new"));
        assert_eq!(model.weather().map(|w| w.temperature), Some(20.0));
    }

    #[test]
    fn guidance_failure_keeps_weather() {
        let mut model = DashboardModel::for_role(Role::Citizen);
        let ticket = model.begin_cycle();
        let error = ClimaError::GuidanceUnavailable("HTTP 500".into());
        model.apply(ticket, CycleOutcome::GuidanceFailed { weather: weather(38.0), error: error.clone() });

        assert!(model.weather().is_some());
        assert_eq!(model.error(), Some(&error));
        assert_eq!(model.guidance_text(), GUIDANCE_PLACEHOLDER);
    }

    #[test]
    fn weather_failure_clears_everything() {
        let mut model = DashboardModel::for_role(Role::Citizen);
        let t1 = model.begin_cycle();
        model.apply(t1, complete(38.0, "tips"));

        let t2 = model.begin_cycle();
        model.apply(t2, CycleOutcome::Failed(ClimaError::LocationDenied));
        assert!(model.weather().is_none());
        assert!(model.guidance().is_none());
        assert!(model.error().is_some_and(ClimaError::blocks_dashboard));
    }

    #[test]
    fn retired_model_ignores_results() {
        let mut model = DashboardModel::for_role(Role::Hospital);
        let ticket = model.begin_cycle();
        model.retire();
        assert!(!model.apply(ticket, complete(30.0, "late")));
        assert!(model.guidance().is_none());
    }
}
