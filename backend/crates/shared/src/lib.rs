//! Shared Kernel
//!
//! Vocabulary shared by every crate of the loan validator workspace:
//! - [`error::app_error::AppError`] and the [`error::kind::ErrorKind`] taxonomy
//! - Typed identifiers ([`id::Id`])
//!
//! Nothing in here knows about HTTP routing, sessions or the record service.
//! Feature crates map their own errors onto [`error::kind::ErrorKind`].

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
