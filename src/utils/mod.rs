//! Utility functions shared across layers.

pub mod code_generator;
pub mod db_error;
pub mod password;
pub mod url_validator;
