use kurban_core::error::CoreError;

/// Failure of a media workflow operation.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<validator::ValidationErrors> for MediaError {
    fn from(errors: validator::ValidationErrors) -> Self {
        MediaError::Core(errors.into())
    }
}

pub type MediaResult<T> = Result<T, MediaError>;
