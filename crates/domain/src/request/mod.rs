//! HTTP request model

mod body;
mod headers;
mod method;
mod path;
mod query;
mod spec;

pub use body::{JSON_CONTENT_TYPE, RequestBody};
pub use headers::{Header, Headers};
pub use method::HttpMethod;
pub use path::PathTemplate;
pub use query::{QueryParam, QueryParams};
pub use spec::RequestSpec;
