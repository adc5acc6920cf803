use std::cell::RefCell;
use std::rc::{Rc, Weak};

use adw::prelude::*;
use gtk4 as gtk;

use climacare::api::models::{Role, WeatherSnapshot};
use climacare::dashboard::{self, DashboardModel, Status};
use climacare::guidance::{CitizenSection, HospitalSection, RiskLevel, SectionKind, Sections};

use crate::ui::{AppContext, Page};

const CITIZEN_CARDS: [(CitizenSection, &str); 4] = [
    (CitizenSection::Health, "Health Tips"),
    (CitizenSection::Ayurvedic, "Ayurvedic Tips"),
    (CitizenSection::Diet, "Today's Diet Plan"),
    (CitizenSection::Alerts, "Allergy & Weather Alerts"),
];

const HOSPITAL_CARDS: [(HospitalSection, &str); 6] = [
    (HospitalSection::RiskOverview, "Weather Risk Overview"),
    (HospitalSection::PatientSurges, "Predicted Patient Surges"),
    (HospitalSection::StaffPlanning, "Staff Planning"),
    (HospitalSection::Supplies, "Medicine & Supplies"),
    (HospitalSection::BedForecast, "ICU & Bed Forecast"),
    (HospitalSection::EmergencyReadiness, "Emergency Readiness"),
];

const EMPTY_SECTION: &str = "Nothing in this section today.";

enum GuidancePanel {
    Citizen(Vec<(CitizenSection, gtk::Label)>),
    Hospital {
        badge: gtk::Label,
        severity: gtk::Label,
        cards: Vec<(HospitalSection, gtk::Label)>,
    },
}

struct WeatherCard {
    root: gtk::Box,
    location: gtk::Label,
    temperature: gtk::Label,
    feels_like: gtk::Label,
    details: gtk::Label,
}

impl WeatherCard {
    fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.add_css_class("card");
        let heading = gtk::Label::new(Some("Current Weather"));
        heading.add_css_class("heading");
        let location = gtk::Label::new(None);
        location.add_css_class("dim-label");
        let temperature = gtk::Label::new(None);
        temperature.add_css_class("title-1");
        let feels_like = gtk::Label::new(None);
        let details = gtk::Label::new(None);
        for w in [&heading, &location, &temperature, &feels_like, &details] {
            w.set_halign(gtk::Align::Start);
            w.set_margin_start(12);
            w.set_margin_end(12);
            root.append(w);
        }
        heading.set_margin_top(12);
        details.set_margin_bottom(12);
        Self { root, location, temperature, feels_like, details }
    }

    fn show(&self, weather: Option<&WeatherSnapshot>) {
        let Some(w) = weather else {
            self.root.set_visible(false);
            return;
        };
        self.root.set_visible(true);
        self.location.set_label(&w.location);
        self.temperature.set_label(&format!("{}°C", w.temperature));
        self.feels_like.set_label(&format!("Feels like {}°C", w.feels_like));
        self.details.set_label(&format!("{}% humidity · {}", w.humidity, w.description));
    }
}

/// One role dashboard. Lives until the navigator unmounts it.
pub struct DashboardView {
    ctx: AppContext,
    model: RefCell<DashboardModel>,
    refresh_btn: gtk::Button,
    spinner: gtk::Spinner,
    banner: gtk::Box,
    banner_label: gtk::Label,
    weather: WeatherCard,
    guidance: GuidancePanel,
}

fn section_card(title: &str) -> (gtk::Box, gtk::Label) {
    let card = gtk::Box::new(gtk::Orientation::Vertical, 6);
    card.add_css_class("card");
    let heading = gtk::Label::new(Some(title));
    heading.add_css_class("heading");
    heading.set_halign(gtk::Align::Start);
    heading.set_margin_top(12);
    heading.set_margin_start(12);
    let body = gtk::Label::new(None);
    body.set_wrap(true);
    body.set_xalign(0.0);
    body.set_selectable(true);
    body.set_margin_start(12);
    body.set_margin_end(12);
    body.set_margin_bottom(12);
    card.append(&heading);
    card.append(&body);
    (card, body)
}

fn fill_cards<K: SectionKind>(cards: &[(K, gtk::Label)], guidance: Option<&str>, fallback: &str) {
    let Some(text) = guidance else {
        for (_, label) in cards {
            label.set_label(fallback);
        }
        return;
    };
    let sections = Sections::<K>::parse(text);
    for (kind, label) in cards {
        let body = sections.get(*kind).trim_end();
        label.set_label(if body.is_empty() { EMPTY_SECTION } else { body });
    }
}

impl DashboardView {
    pub fn mount(role: Role, ctx: &AppContext) -> Page {
        let (title, subtitle) = match role {
            Role::Citizen => (
                "Personal Health Dashboard",
                "Weather-aware health guidance tailored for you",
            ),
            Role::Hospital => (
                "Hospital Operations Dashboard",
                "AI-powered surge prediction and resource planning",
            ),
        };

        let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
        root.set_margin_top(24);
        root.set_margin_bottom(24);
        root.set_margin_start(24);
        root.set_margin_end(24);

        // Header
        let header = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        let titles = gtk::Box::new(gtk::Orientation::Vertical, 2);
        titles.set_hexpand(true);
        let title_lbl = gtk::Label::new(Some(title));
        title_lbl.add_css_class("title-2");
        title_lbl.set_halign(gtk::Align::Start);
        let subtitle_lbl = gtk::Label::new(Some(subtitle));
        subtitle_lbl.add_css_class("dim-label");
        subtitle_lbl.set_halign(gtk::Align::Start);
        titles.append(&title_lbl);
        titles.append(&subtitle_lbl);
        header.append(&titles);

        let spinner = gtk::Spinner::new();
        let refresh_btn = gtk::Button::with_label("Refresh");
        refresh_btn.set_valign(gtk::Align::Center);

        // Error banner with retry
        let banner = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        banner.add_css_class("card");
        banner.set_visible(false);
        let banner_label = gtk::Label::new(None);
        banner_label.add_css_class("error");
        banner_label.set_wrap(true);
        banner_label.set_xalign(0.0);
        banner_label.set_hexpand(true);
        banner_label.set_margin_top(12);
        banner_label.set_margin_bottom(12);
        banner_label.set_margin_start(12);
        let retry_btn = gtk::Button::with_label("Retry");
        retry_btn.set_valign(gtk::Align::Center);
        retry_btn.set_margin_end(12);
        banner.append(&banner_label);
        banner.append(&retry_btn);

        let weather = WeatherCard::new();
        let body = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        weather.root.set_valign(gtk::Align::Start);
        body.append(&weather.root);

        let cards_box = gtk::Box::new(gtk::Orientation::Vertical, 12);
        cards_box.set_hexpand(true);
        body.append(&cards_box);

        let guidance = match role {
            Role::Citizen => GuidancePanel::Citizen(
                CITIZEN_CARDS
                    .iter()
                    .map(|(kind, title)| {
                        let (card, label) = section_card(title);
                        cards_box.append(&card);
                        (*kind, label)
                    })
                    .collect(),
            ),
            Role::Hospital => {
                let badge = gtk::Label::new(None);
                badge.set_valign(gtk::Align::Center);
                header.append(&badge);
                let severity = gtk::Label::new(None);
                severity.add_css_class("dim-label");
                severity.set_halign(gtk::Align::Start);
                cards_box.append(&severity);
                let cards = HOSPITAL_CARDS
                    .iter()
                    .map(|(kind, title)| {
                        let (card, label) = section_card(title);
                        cards_box.append(&card);
                        (*kind, label)
                    })
                    .collect();
                GuidancePanel::Hospital { badge, severity, cards }
            }
        };

        header.append(&spinner);
        header.append(&refresh_btn);
        root.append(&header);
        root.append(&banner);
        root.append(&body);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .child(&root)
            .build();

        let view = Rc::new(DashboardView {
            ctx: ctx.clone(),
            model: RefCell::new(DashboardModel::for_role(role)),
            refresh_btn: refresh_btn.clone(),
            spinner,
            banner,
            banner_label,
            weather,
            guidance,
        });

        for button in [&refresh_btn, &retry_btn] {
            let weak: Weak<DashboardView> = Rc::downgrade(&view);
            button.connect_clicked(move |_| {
                if let Some(view) = weak.upgrade() {
                    view.refresh();
                }
            });
        }

        view.refresh();

        Page::new(scroller).with_unmount(move || {
            view.model.borrow_mut().retire();
            log::debug!("{} dashboard unmounted", role);
        })
    }

    fn refresh(self: &Rc<Self>) {
        let ticket = self.model.borrow_mut().begin_cycle();
        self.render();

        let api = self.ctx.api.clone();
        let locator = self.ctx.locator.clone();
        let kind = self.model.borrow().kind().clone();
        let weak = Rc::downgrade(self);
        crate::utils::run_async_to_main(
            async move { dashboard::run_cycle(&api, locator.as_ref(), &kind).await },
            move |outcome| {
                let Some(view) = weak.upgrade() else {
                    return;
                };
                let applied = view.model.borrow_mut().apply(ticket, outcome);
                if applied {
                    view.render();
                }
            },
        );
    }

    fn render(&self) {
        let model = self.model.borrow();

        let busy = model.is_busy();
        self.spinner.set_spinning(busy);
        self.refresh_btn.set_sensitive(!busy);

        match model.status() {
            Status::Failed(err) if err.blocks_dashboard() => {
                self.banner_label.set_label(&format!("Could not load the dashboard. {}", err));
                self.banner.set_visible(true);
            }
            Status::Failed(err) => {
                self.banner_label.set_label(&err.to_string());
                self.banner.set_visible(true);
            }
            _ => self.banner.set_visible(false),
        }

        self.weather.show(model.weather());

        let placeholder = model.guidance_text();
        match &self.guidance {
            GuidancePanel::Citizen(cards) => fill_cards(cards, model.guidance(), placeholder),
            GuidancePanel::Hospital { badge, severity, cards } => {
                fill_cards(cards, model.guidance(), placeholder);
                match model.weather() {
                    Some(w) => {
                        let risk = RiskLevel::from_weather(w);
                        badge.set_label(&format!("{} Risk", risk));
                        badge.set_css_classes(&["caption-heading", risk.css_class()]);
                        badge.set_visible(true);
                    }
                    None => badge.set_visible(false),
                }
                match model.guidance() {
                    Some(text) => {
                        let overview = Sections::<HospitalSection>::parse(text);
                        let level = RiskLevel::from_guidance(overview.get(HospitalSection::RiskOverview));
                        severity.set_label(&format!("AI severity assessment: {}", level));
                        severity.set_visible(true);
                    }
                    None => severity.set_visible(false),
                }
            }
        }
    }
}
