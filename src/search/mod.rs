pub mod client;
pub mod error;
pub mod form;
pub mod traits;
pub mod types;

pub use client::PropertySearchClient;
pub use form::SearchForm;
pub use types::SearchQuery;
