//! Infrastructure: logging setup.

pub mod logging;
