//! Session errors

use recipehub_auth::AuthError;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session token rejected: {0}")]
    Decode(#[from] AuthError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}
