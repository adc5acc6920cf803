use std::cell::RefCell;
use std::rc::Rc;

use adw::Application;
use adw::prelude::*;

use climacare::router::{self, Route};
use climacare::session::{Session, SessionEvent, SessionUpdate};

use crate::ui::dashboard_view::DashboardView;
use crate::ui::{AppContext, Navigate, Page};

/// Owns the session and the page currently on screen. Every page change goes
/// through the route guard.
struct Navigator {
    ctx: AppContext,
    session: RefCell<Session>,
    path: RefCell<String>,
    current: RefCell<Option<Page>>,
    content: adw::Bin,
    overlay: adw::ToastOverlay,
    role_label: gtk4::Label,
    sign_in_btn: gtk4::Button,
    sign_out_btn: gtk4::Button,
}

impl Navigator {
    fn navigate(self: &Rc<Self>, path: &str) {
        let session = *self.session.borrow();
        let route = router::resolve(&session, path);
        if route.path() != path {
            log::debug!("{} resolved to {}", path, route);
        }

        let mounted = match self.current.borrow().as_ref() {
            Some(_) => Route::parse(&self.path.borrow()),
            None => None,
        };
        if !router::needs_remount(mounted, route) {
            self.update_header();
            return;
        }

        let old = self.current.borrow_mut().take();
        if let Some(hook) = old.and_then(|page| page.on_unmount) {
            hook();
        }

        let page = match route {
            Route::Landing => crate::ui::landing::landing_page(self.navigate_fn()),
            Route::Login => crate::ui::login::login_page(&self.ctx, self.session_update_fn()),
            Route::Dashboard(role) => DashboardView::mount(role, &self.ctx),
            Route::Chat => crate::ui::chat_view::chat_page(&self.ctx),
        };
        self.content.set_child(Some(&page.widget));
        *self.current.borrow_mut() = Some(page);
        *self.path.borrow_mut() = route.path();
        self.update_header();
    }

    fn navigate_fn(self: &Rc<Self>) -> Navigate {
        let weak = Rc::downgrade(self);
        Rc::new(move |path: &str| {
            if let Some(nav) = weak.upgrade() {
                nav.navigate(path);
            }
        })
    }

    fn session_update_fn(self: &Rc<Self>) -> SessionUpdate {
        let weak = Rc::downgrade(self);
        Rc::new(move |event: SessionEvent| {
            if let Some(nav) = weak.upgrade() {
                nav.on_session_event(event);
            }
        })
    }

    fn on_session_event(self: &Rc<Self>, event: SessionEvent) {
        if !self.session.borrow_mut().apply(event) {
            log::debug!("ignored session event {:?}", event);
            return;
        }
        match event {
            SessionEvent::SignedIn(role) => {
                self.overlay.add_toast(adw::Toast::new(&format!("Signed in as {}", role)));
                self.navigate(&Route::Dashboard(role).path());
            }
            SessionEvent::SignedOut => {
                self.overlay.add_toast(adw::Toast::new("Signed out"));
                // Re-check the current page against the empty session.
                let path = self.path.borrow().clone();
                self.navigate(&path);
            }
        }
    }

    fn update_header(&self) {
        match self.session.borrow().role() {
            Some(role) => {
                self.role_label.set_label(&format!("{} Dashboard", capitalize(role.as_str())));
                self.role_label.set_visible(true);
                self.sign_in_btn.set_visible(false);
                self.sign_out_btn.set_visible(true);
            }
            None => {
                self.role_label.set_visible(false);
                self.sign_in_btn.set_visible(true);
                self.sign_out_btn.set_visible(false);
            }
        }
    }

    fn dashboard_path(&self) -> String {
        match self.session.borrow().role() {
            Some(role) => Route::Dashboard(role).path(),
            None => Route::Login.path(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn show_main_window(app: &Application, ctx: AppContext) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("SurgeSense")
        .default_width(1080)
        .default_height(720)
        .build();

    let overlay = adw::ToastOverlay::new();
    let content = adw::Bin::new();
    content.set_vexpand(true);
    overlay.set_child(Some(&content));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("SurgeSense"));
    title.add_css_class("heading");
    header.set_title_widget(Some(&title));

    let home_btn = gtk4::Button::with_label("Home");
    let dashboard_btn = gtk4::Button::with_label("Dashboard");
    let chat_btn = gtk4::Button::with_label("Chat");
    header.pack_start(&home_btn);
    header.pack_start(&dashboard_btn);
    header.pack_start(&chat_btn);

    let sign_in_btn = gtk4::Button::with_label("Sign In");
    sign_in_btn.add_css_class("suggested-action");
    let sign_out_btn = gtk4::Button::with_label("Sign Out");
    let role_label = gtk4::Label::new(None);
    role_label.add_css_class("dim-label");
    header.pack_end(&sign_in_btn);
    header.pack_end(&sign_out_btn);
    header.pack_end(&role_label);

    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    let nav = Rc::new(Navigator {
        ctx,
        session: RefCell::new(Session::signed_out()),
        path: RefCell::new(Route::Landing.path()),
        current: RefCell::new(None),
        content,
        overlay,
        role_label,
        sign_in_btn: sign_in_btn.clone(),
        sign_out_btn: sign_out_btn.clone(),
    });

    for (button, target) in [(&home_btn, "/"), (&chat_btn, "/chat"), (&sign_in_btn, "/login")] {
        let navigate = nav.navigate_fn();
        button.connect_clicked(move |_| (navigate)(target));
    }
    {
        let weak = Rc::downgrade(&nav);
        dashboard_btn.connect_clicked(move |_| {
            if let Some(nav) = weak.upgrade() {
                let path = nav.dashboard_path();
                nav.navigate(&path);
            }
        });
    }
    {
        let update_session = nav.session_update_fn();
        sign_out_btn.connect_clicked(move |_| (update_session)(SessionEvent::SignedOut));
    }

    // The window keeps the navigator alive for as long as it is open.
    {
        let nav = nav.clone();
        window.connect_close_request(move |_| {
            let page = nav.current.borrow_mut().take();
            if let Some(hook) = page.and_then(|p| p.on_unmount) {
                hook();
            }
            glib::Propagation::Proceed
        });
    }

    nav.navigate("/");
    window.present();
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalizes_role_names() {
        assert_eq!(capitalize("hospital"), "Hospital");
        assert_eq!(capitalize(""), "");
    }
}
