mod error;
#[cfg(any(test, feature = "inmemory"))]
mod inmemory;
mod traits;

pub use error::{RemoteError, Result};
#[cfg(any(test, feature = "inmemory"))]
pub use inmemory::{InMemoryEventsApi, RemoteCall};
pub use traits::{EventsApi, InsertOptions};
