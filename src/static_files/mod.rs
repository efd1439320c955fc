//! Static file serving.
//!
//! - **`sanitize`**: confines request paths to the storage root
//! - **`responder`**: streams a file, with single-page-app fallback and 404
//! - **`storage`**: startup inspection of the storage root

pub mod responder;
pub mod sanitize;
pub mod storage;

pub use responder::{FileResponder, ResponseOutcome};
pub use sanitize::PathSanitizer;
