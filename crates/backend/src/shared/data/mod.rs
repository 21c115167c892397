pub mod db;
pub mod store_error;

pub use store_error::{StoreError, StoreErrorKind};
