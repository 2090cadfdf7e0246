//! Domain models shared across the Foo API.

pub mod api_error;
pub mod foo;
pub mod signal;

pub use api_error::ErrorResponse;
pub use foo::Foo;
pub use signal::{ForbiddenSignal, NotFoundSignal};
