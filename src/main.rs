mod ui;
mod utils;

use adw::prelude::*;
use adw::Application;

const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

static GLIB_LOGGER: glib::GlibLogger = glib::GlibLogger::new(
    glib::GlibLoggerFormat::Plain,
    glib::GlibLoggerDomain::CrateTarget,
);

fn main() -> glib::ExitCode {
    if log::set_logger(&GLIB_LOGGER).is_ok() {
        log::set_max_level(LOG_LEVEL);
    }

    let config = climacare::app::AppConfig::load();
    log::info!("using backend {}", config.base_url);

    let app = Application::builder()
        .application_id("org.climacare.ClimaCareGtk")
        .build();
    app.connect_activate(move |app| {
        crate::ui::build_ui(app, &config);
    });
    app.run()
}

#[cfg(test)]
mod tests {
    #[test]
    fn debug_lines_are_off_by_default() {
        assert_eq!(super::LOG_LEVEL, log::LevelFilter::Info);
        assert!(log::Level::Debug > super::LOG_LEVEL);
    }
}
