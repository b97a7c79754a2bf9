//! Synchronizable entity model for ShopLink.
//!
//! Defines the records that flow between the host system and the endpoint
//! store:
//! - [`Category`]: an entity with a paired identity, a parent link, a status
//!   flag and its localized sub-records
//! - [`CategoryI18n`]: one localization, keyed by its language code
//! - [`EntityRecord`]: a record of any synchronizable type, tagged by kind
//! - [`QueryFilter`]: the pass-through filter handed to discovery and count
//!
//! These types are storage-agnostic; `shoplink-sync` maps them onto tables.

mod category;
mod filter;
mod record;

pub use category::{Category, CategoryI18n};
pub use filter::{QueryFilter, PARENT_ID_FILTER};
pub use record::EntityRecord;
