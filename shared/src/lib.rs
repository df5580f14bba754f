//! Model and UI state shared by the admin client and its static host.
//!
//! Nothing in here touches the browser, so everything is tested natively.

pub mod account;
pub mod admins;
pub mod api;
pub mod config;
pub mod enterprise;
pub mod form;
pub mod i18n;
pub mod locale;
pub mod reporter;
pub mod route;
