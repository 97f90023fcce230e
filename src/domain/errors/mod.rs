mod load_error;
mod store_error;

pub use load_error::LoadError;
pub use store_error::StoreError;
