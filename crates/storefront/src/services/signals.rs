//! Take-once session values.
//!
//! A referring page leaves a value behind; the next page that cares reads and
//! removes it in one step. Unreadable values are dropped silently.

use tower_sessions::Session;
use vitrina_core::PendingFilter;

use crate::error::AppError;
use crate::models::{Flash, session_keys};

/// Leave a category marker for the catalog page.
///
/// # Errors
///
/// Returns [`AppError::Session`] if the session store fails.
pub async fn set_pending_filter(session: &Session, filter: &PendingFilter) -> Result<(), AppError> {
    session.insert(session_keys::PENDING_FILTER, filter).await?;
    Ok(())
}

/// Take the category marker, clearing it whether or not it is usable.
///
/// # Errors
///
/// Returns [`AppError::Session`] if the session store fails.
pub async fn take_pending_filter(session: &Session) -> Result<Option<PendingFilter>, AppError> {
    take(session, session_keys::PENDING_FILTER).await
}

/// Queue a notice for the next full page render.
///
/// # Errors
///
/// Returns [`AppError::Session`] if the session store fails.
pub async fn push_flash(session: &Session, flash: &Flash) -> Result<(), AppError> {
    session.insert(session_keys::FLASH, flash).await?;
    Ok(())
}

/// Take the queued notice, if any.
///
/// # Errors
///
/// Returns [`AppError::Session`] if the session store fails.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, AppError> {
    take(session, session_keys::FLASH).await
}

async fn take<T>(session: &Session, key: &str) -> Result<Option<T>, AppError>
where
    T: serde::de::DeserializeOwned,
{
    match session.remove::<T>(key).await {
        Ok(value) => Ok(value),
        Err(tower_sessions::session::Error::SerdeJson(e)) => {
            tracing::debug!(key, error = %e, "Dropping unreadable session value");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
