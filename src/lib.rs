pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod mail;
pub mod models;
pub mod notify;
pub mod render;
pub mod resources;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use notify::{DeliveryReport, FatalError, RequestAttributes, SummaryNotifier};
pub use state::AppState;
