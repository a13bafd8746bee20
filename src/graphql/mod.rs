//! Wire shape of the explorer's GraphQL solid-handle fragment.
pub mod conversion;
pub mod types;

pub use conversion::*;
pub use types::*;
