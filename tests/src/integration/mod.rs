//! Cross-crate integration suites

mod properties;
mod scenarios;
