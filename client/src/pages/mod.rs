//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its fetches and local signals and delegates decisions to
//! `homeschool::state` helpers.

pub mod admin;
pub mod login;
pub mod register;
pub mod student;
pub mod teacher;
