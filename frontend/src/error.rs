use thiserror::Error;

use crate::auth::AuthError;
use crate::backend::BackendError;
use crate::validation::ValidationError;

/// Anything a page action can fail with. Every variant ends up as a toast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),
}

impl AppError {
    /// Short text for a toast. Backend details go to the log, not the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Backend(BackendError::Network(_)) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            AppError::Backend(_) | AppError::Auth(AuthError::Backend(_)) => {
                "The server could not complete the request. Please try again.".to_string()
            }
            AppError::Auth(AuthError::Hashing(_)) => {
                "Something went wrong while handling the password.".to_string()
            }
            AppError::Auth(err) => err.to_string(),
            AppError::Validation(err) => err.to_string(),
            AppError::NotFound(what) => format!("{} not found", what),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_hide_backend_details() {
        let err: AppError = BackendError::Status {
            status: 500,
            message: "relation \"users\" does not exist".into(),
        }
        .into();
        assert!(!err.user_message().contains("relation"));

        let err: AppError = AuthError::Backend(BackendError::Decode("eof".into())).into();
        assert!(!err.user_message().contains("eof"));
    }

    #[test]
    fn user_errors_are_shown_verbatim() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(err.user_message(), "Invalid email or password");

        let err: AppError = ValidationError::MissingFields(vec!["Plan"]).into();
        assert_eq!(err.user_message(), "Please fill in: Plan");

        assert_eq!(AppError::NotFound("Product").user_message(), "Product not found");
    }
}
