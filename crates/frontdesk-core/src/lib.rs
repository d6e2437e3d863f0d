pub mod autofill;
pub mod domain;
pub mod error;
pub mod matching;
pub mod rules;

pub use autofill::{merge_fields, AutoFill, FillOutcome, IdentityField, IdentityFields, Merged};
pub use domain::*;
pub use error::CoreError;
pub use matching::{find_match, matches_email, matches_phone, MatchKind};
pub use rules::*;
