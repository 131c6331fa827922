mod extractor;
mod guard;
mod router;

pub use guard::require_session;
pub use router::router;
