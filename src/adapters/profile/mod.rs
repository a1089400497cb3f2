//! User profile source adapters.

mod static_source;

pub use static_source::StaticProfileSource;
