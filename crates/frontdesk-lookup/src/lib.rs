pub mod error;
pub mod existence;
pub mod http;
pub mod local;
pub mod source;

pub use error::{LookupError, Result};
pub use existence::{CheckerSettings, ExistenceChecker, ExistenceSnapshot};
pub use local::LocalDirectory;
pub use source::VisitorDirectory;
