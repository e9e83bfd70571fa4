//! Value Object Module

pub mod person_name;
pub mod username;
