//! Mock collaborators.

pub mod host;
