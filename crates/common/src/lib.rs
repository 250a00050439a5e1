//! Shared building blocks for paginated listings.
//! - `pagination`: page window construction (which page links to render).
//! - `request`: reads the current page and base URI from a request URI.

pub mod errors;
pub mod pagination;
pub mod request;
pub mod types;
pub mod utils;

pub use errors::PaginationError;
pub use pagination::{build_page_links, Page, PageLink, PaginationConfig};
pub use request::build_page;

