use std::rc::Rc;

use adw::prelude::*;
use gtk4 as gtk;

use climacare::api::models::Role;
use climacare::session::{SessionEvent, SessionUpdate};

use crate::ui::{AppContext, Page};

pub fn login_page(ctx: &AppContext, update_session: SessionUpdate) -> Page {
    // Root container
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);
    root.set_valign(gtk::Align::Center);
    root.set_halign(gtk::Align::Center);
    root.set_width_request(360);

    let title = gtk::Label::new(Some("Sign In to SurgeSense"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let subtitle = gtk::Label::new(Some("Access your personalized healthcare dashboard"));
    subtitle.add_css_class("dim-label");
    subtitle.set_halign(gtk::Align::Start);
    root.append(&subtitle);

    let user_entry = gtk::Entry::new();
    user_entry.set_placeholder_text(Some("Username"));
    user_entry.set_hexpand(true);

    let pass_entry = gtk::PasswordEntry::new();
    pass_entry.set_placeholder_text(Some("Password"));
    pass_entry.set_show_peek_icon(true);
    pass_entry.set_hexpand(true);

    let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
    form.append(&user_entry);
    form.append(&pass_entry);
    root.append(&form);

    // Error line, hidden until a login fails
    let status = gtk::Label::new(None);
    status.add_css_class("error");
    status.set_halign(gtk::Align::Start);
    status.set_visible(false);
    root.append(&status);

    let login_btn = gtk::Button::with_label("Sign In");
    login_btn.add_css_class("suggested-action");
    login_btn.set_halign(gtk::Align::End);
    root.append(&login_btn);

    let demo_label = gtk::Label::new(Some("Demo accounts"));
    demo_label.add_css_class("dim-label");
    demo_label.set_halign(gtk::Align::Start);
    root.append(&demo_label);

    let demo_row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    demo_row.set_homogeneous(true);
    let citizen_btn = gtk::Button::with_label("Citizen");
    let hospital_btn = gtk::Button::with_label("Hospital");
    demo_row.append(&citizen_btn);
    demo_row.append(&hospital_btn);
    root.append(&demo_row);

    let buttons = [login_btn.clone(), citizen_btn.clone(), hospital_btn.clone()];

    // Shared login routine; `failure` is what the status line says on error.
    let attempt: Rc<dyn Fn(String, String, &'static str)> = {
        let api = ctx.api.clone();
        let status = status.clone();
        Rc::new(move |username: String, password: String, failure: &'static str| {
            for b in &buttons {
                b.set_sensitive(false);
            }
            status.set_visible(false);

            let api = api.clone();
            let status = status.clone();
            let buttons = buttons.clone();
            let update_session = update_session.clone();
            crate::utils::run_async_to_main(
                async move { api.login(&username, &password).await },
                move |res| {
                    for b in &buttons {
                        b.set_sensitive(true);
                    }
                    match res {
                        Ok(role) => {
                            log::info!("signed in as {}", role);
                            (update_session)(SessionEvent::SignedIn(role));
                        }
                        Err(err) => {
                            log::info!("login rejected: {}", err);
                            status.set_label(failure);
                            status.set_visible(true);
                        }
                    }
                },
            );
        })
    };

    let on_submit: Rc<dyn Fn()> = {
        let attempt = attempt.clone();
        let user_entry = user_entry.clone();
        let pass_entry = pass_entry.clone();
        let status = status.clone();
        Rc::new(move || {
            let username = user_entry.text().trim().to_string();
            let password = pass_entry.text().to_string();
            if username.is_empty() || password.is_empty() {
                status.set_label("Please enter username and password.");
                status.set_visible(true);
                return;
            }
            (attempt)(username, password, "Invalid credentials");
        })
    };

    {
        let on_submit = on_submit.clone();
        login_btn.connect_clicked(move |_| (on_submit)());
    }
    // Enter key in either field submits
    {
        let on_submit = on_submit.clone();
        user_entry.connect_activate(move |_| (on_submit)());
    }
    {
        let on_submit = on_submit.clone();
        pass_entry.connect_activate(move |_| (on_submit)());
    }

    for (button, role) in [(citizen_btn, Role::Citizen), (hospital_btn, Role::Hospital)] {
        let attempt = attempt.clone();
        button.connect_clicked(move |_| {
            let (username, password) = demo_credentials(role);
            (attempt)(username.to_string(), password.to_string(), "Login failed");
        });
    }

    Page::new(root)
}

fn demo_credentials(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Citizen => ("citizen", "1234"),
        Role::Hospital => ("hospital", "9999"),
    }
}
