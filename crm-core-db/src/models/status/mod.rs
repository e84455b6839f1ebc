pub mod document;
pub mod status_reason;

pub use document::*;
pub use status_reason::*;
