//! RecipeHub client session
//!
//! Holds who is signed in, persists the raw token and a snapshot of the
//! session across restarts, and writes the access cookie the route guard
//! reads on page loads.

pub mod cookies;
pub mod error;
pub mod state;
pub mod storage;
pub mod store;

pub use cookies::{CookieJar, MemoryCookieJar};
pub use error::SessionError;
pub use state::{SessionPhase, SessionState};
pub use storage::{persisted_token, FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::SessionStore;
