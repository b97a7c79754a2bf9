//! Identity correlation store for ShopLink.
//!
//! Persists `(type, endpoint id, host id)` links between the endpoint store
//! and the host system. Links are unique per type on both sides; the unique
//! indexes of the `mapping` table enforce this, so concurrent writers cannot
//! both slip past a check-then-insert.
//!
//! # Example
//!
//! ```
//! use shoplink_db::Database;
//! use shoplink_mapping::PrimaryKeyMapper;
//! use shoplink_types::IdentityType;
//!
//! let db = Database::open_in_memory().unwrap();
//! let mapper = PrimaryKeyMapper::new(db);
//!
//! mapper.save(IdentityType::Category, "a1b2", 42).unwrap();
//! assert_eq!(mapper.get_host_id(IdentityType::Category, "a1b2").unwrap(), Some(42));
//! ```

mod error;
mod mapper;

pub use error::{MappingError, MappingResult};
pub use mapper::{ClearScope, PrimaryKeyMapper, WipeConfirmation};
