//! # client
//!
//! Leptos single-page front-end for Homeschool Interactive. Session, routing
//! decisions and REST calls come from the `homeschool` core crate; this crate
//! only renders and wires browser events to them.
//!
//! Browser-only code (localStorage, timers, spawned requests) is gated behind
//! the `csr` feature so the pure helpers build and test natively.

pub mod app;
pub mod components;
pub mod context;
pub mod pages;
pub mod storage;

/// Browser entry point: logging, panic hook, then mount [`app::App`].
#[cfg(feature = "csr")]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
