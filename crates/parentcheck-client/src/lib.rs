pub mod api;
pub mod error;
pub mod http;

pub use api::ParentApi;
pub use error::{ClientError, Result};
pub use http::{HttpParentApi, PARENT_ID_HEADER};
