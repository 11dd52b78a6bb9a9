//! Item Repository Module
//!
//! - item_repo: Core CRUD operations and search
//! - item_city: City / category listing and bulk operations used by sync
//! - item_positioning: Manual sort order management

mod item_repo;
mod item_city;
mod item_positioning;

pub use item_repo::ItemRepository;

pub use item_city::ItemCityOperations;
pub use item_positioning::ItemPositioningOperations;
