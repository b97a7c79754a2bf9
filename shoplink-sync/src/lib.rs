//! Entity synchronization for ShopLink.
//!
//! Each entity type has one [`SyncController`] that the host system drives
//! through four capabilities:
//!
//! - **discover_unlinked**: entities in the endpoint store with no
//!   correlation row of the controller's type
//! - **upsert**: insert or update keyed by endpoint id, minting the id on
//!   first write, with a non-destructive localization merge
//! - **delete**: remove a previously written entity
//! - **count**: the size of the discovery set, computed without hydrating it
//!
//! ## Sync pass
//!
//! 1. The host asks for unlinked entities and imports them
//! 2. The host pushes records back through `upsert`
//! 3. The host saves the resulting `(type, endpoint id, host id)` link in the
//!    correlation store (`shoplink-mapping`)
//! 4. The linked entity no longer shows up in discovery
//!
//! # Example
//!
//! ```
//! use shoplink_db::Database;
//! use shoplink_model::{Category, CategoryI18n, QueryFilter};
//! use shoplink_sync::CategoryController;
//!
//! let db = Database::open_in_memory().unwrap();
//! let controller = CategoryController::new(db);
//!
//! let saved = controller
//!     .upsert_category(Category::new().with_i18n(CategoryI18n::new("en", "Shoes")))
//!     .unwrap();
//! assert!(saved.endpoint_id().is_some());
//! assert_eq!(controller.count_unlinked(&QueryFilter::new()).unwrap(), 1);
//! ```

mod category;
mod controller;
mod error;
mod merger;

pub use category::CategoryController;
pub use controller::{ControllerRegistry, Statistic, SyncController};
pub use error::{SyncError, SyncResult, WriteStage};
pub use merger::{I18nWrite, LocalizationMerger};
