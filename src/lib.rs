//! Core of the ClimaCare client: backend API, session and routing rules,
//! dashboard fetch cycles, guidance sectioning and chat history. The GTK
//! front end in `main.rs` is a thin layer over these.

pub mod api;
pub mod app;
pub mod chat;
pub mod dashboard;
pub mod error;
pub mod guidance;
pub mod location;
pub mod router;
pub mod session;

pub use error::{ClimaError, ClimaResult};
