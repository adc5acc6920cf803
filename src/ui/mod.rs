pub mod chat_view;
pub mod dashboard_view;
pub mod landing;
pub mod login;
pub mod main_window;

use std::rc::Rc;
use std::sync::Arc;

use adw::Application;
use adw::prelude::*;

use climacare::api::ApiClient;
use climacare::app::AppConfig;
use climacare::location::{ConfiguredLocator, Locator};

/// Backend handles shared by every page.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub locator: Arc<dyn Locator>,
}

/// Ask the window to show a path; the route guard decides what actually
/// appears.
pub type Navigate = Rc<dyn Fn(&str)>;

/// A mounted page and what to do when it is replaced.
pub struct Page {
    pub widget: gtk4::Widget,
    pub on_unmount: Option<Box<dyn FnOnce()>>,
}

impl Page {
    pub fn new(widget: impl IsA<gtk4::Widget>) -> Self {
        Self { widget: widget.upcast(), on_unmount: None }
    }

    pub fn with_unmount(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_unmount = Some(Box::new(hook));
        self
    }
}

pub fn build_ui(app: &Application, config: &AppConfig) {
    let api = match ApiClient::new(&config.base_url) {
        Ok(api) => api,
        Err(e) => {
            log::error!("cannot create HTTP client: {}", e);
            return;
        }
    };
    let ctx = AppContext {
        api,
        locator: Arc::new(ConfiguredLocator::new(config.location.clone())),
    };
    crate::ui::main_window::show_main_window(app, ctx);
}
