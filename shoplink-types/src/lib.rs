//! Core type definitions for ShopLink.
//!
//! This crate defines the identifier types shared by every other crate:
//! - [`IdentityType`], the entity-type tag that scopes every correlation
//! - [`Identity`], the paired host/endpoint identifier carried by records
//! - [`new_endpoint_id`], the generator for freshly minted endpoint ids
//!
//! Entity payloads (categories, their translations, query filters) live in
//! `shoplink-model`.

mod identity;
mod identity_type;

pub use identity::{new_endpoint_id, Identity, ENDPOINT_ID_LEN};
pub use identity_type::IdentityType;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown identity type: {0}")]
    UnknownIdentityType(String),
}
