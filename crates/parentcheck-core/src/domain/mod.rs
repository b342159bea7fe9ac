pub mod email;
pub mod ids;

pub use email::{is_valid_email, EmailAddress};
pub use ids::ParentId;
