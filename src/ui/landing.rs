use adw::prelude::*;
use gtk4 as gtk;

use crate::ui::{Navigate, Page};

const FEATURES: [(&str, &str); 3] = [
    (
        "Surge Forecasting",
        "AI-powered predictions of patient surges based on weather patterns.",
    ),
    (
        "Smart Resource Planning",
        "Staff and supply recommendations for hospitals ahead of weather events.",
    ),
    (
        "Preventive Health",
        "Personalized health guidance for citizens based on current conditions.",
    ),
];

pub fn landing_page(navigate: Navigate) -> Page {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 18);
    root.set_margin_top(36);
    root.set_margin_bottom(36);
    root.set_margin_start(36);
    root.set_margin_end(36);
    root.set_valign(gtk::Align::Center);

    let title = gtk::Label::new(Some("Predict Patient Surges Before They Happen"));
    title.add_css_class("title-1");
    title.set_wrap(true);
    root.append(&title);

    let blurb = gtk::Label::new(Some(
        "SurgeSense combines weather data with AI to help hospitals prepare for patient surges \
         while giving citizens personalized health guidance.",
    ));
    blurb.add_css_class("dim-label");
    blurb.set_wrap(true);
    blurb.set_justify(gtk::Justification::Center);
    root.append(&blurb);

    let cta = gtk::Button::with_label("View Dashboard");
    cta.add_css_class("suggested-action");
    cta.add_css_class("pill");
    cta.set_halign(gtk::Align::Center);
    cta.connect_clicked(move |_| (navigate)("/login"));
    root.append(&cta);

    let features = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    features.set_homogeneous(true);
    for (heading, text) in FEATURES {
        let card = gtk::Box::new(gtk::Orientation::Vertical, 6);
        card.add_css_class("card");
        card.set_margin_top(12);
        let h = gtk::Label::new(Some(heading));
        h.add_css_class("heading");
        h.set_margin_top(12);
        let body = gtk::Label::new(Some(text));
        body.set_wrap(true);
        body.set_margin_start(12);
        body.set_margin_end(12);
        body.set_margin_bottom(12);
        card.append(&h);
        card.append(&body);
        features.append(&card);
    }
    root.append(&features);

    let scroller = gtk::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .child(&root)
        .build();
    Page::new(scroller)
}
