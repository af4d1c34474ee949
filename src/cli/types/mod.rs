//! Type-safe wrappers for CheapShark query parameters.

pub mod ids;
pub mod price;


pub use ids::StoreId;
pub use price::UpperPrice;
