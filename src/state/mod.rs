//! Pure dashboard state helpers shared by the browser client and the CLI.
//!
//! DESIGN
//! ======
//! Components own signals and effects; everything that can be decided
//! without a DOM (sorting, status toggles, edit-on-blur diffs, delete
//! outcome classification) lives here so it is testable natively.

pub mod admin;
pub mod forms;
pub mod header;
pub mod student;
pub mod teacher;
