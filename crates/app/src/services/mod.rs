//! Services layered over the database.

pub mod settings;

pub use settings::RedirectSettingsService;
