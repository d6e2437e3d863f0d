pub mod email;
pub mod form;
pub mod ids;
pub mod phone;
pub mod visitor;

pub use email::normalize_email;
pub use form::VisitorForm;
pub use ids::VisitorId;
pub use phone::{phone_digits, phone_match_key, PHONE_MATCH_DIGITS};
pub use visitor::Visitor;
