//! Core types for the 404 redirect app.
//!
//! This module provides type-safe wrappers for the app's domain concepts.

pub mod id;
pub mod setting;
pub mod shop;

pub use id::RedirectSettingId;
pub use setting::{RedirectSetting, RedirectSettingUpdate, RedirectTarget};
pub use shop::{ShopDomain, ShopDomainError};
