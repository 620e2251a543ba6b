pub mod client;
pub mod error;
mod rank;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{Place, SearchOptions};
