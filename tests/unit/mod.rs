//! Configuration tests run through the public API.

mod config_parsing;
mod config_validation;
