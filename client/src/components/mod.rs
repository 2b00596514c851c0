//! Shared UI building blocks: page chrome, the route guard wrapper and a modal.

pub mod footer;
pub mod header;
pub mod layout;
pub mod modal;
pub mod protected_route;
