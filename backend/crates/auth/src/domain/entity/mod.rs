//! Entity Module

pub mod principal;
pub mod session;
