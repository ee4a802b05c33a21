//! Errors surfaced by the navigation services
//!
//! Every service operation resolves to `Result<T, NavigationError>`. Nothing here is
//! retried automatically: navigation transitions are user-facing and must not be
//! silently repeated.

use thiserror::Error;

/// Failure of a push/pop/remove request
#[derive(Debug, Error)]
pub enum NavigationError {
    /// No view registered for the view-model type and contract, or the registered
    /// view is the wrong kind for the surface. Raised before the host is touched.
    #[error(
        "could not resolve a view for '{view_model}' (contract: {}): {reason}",
        contract.as_deref().unwrap_or("<none>")
    )]
    ViewResolution {
        view_model: String,
        contract: Option<String>,
        reason: String,
    },

    /// Pop or remove against an empty stack, as reported by the host.
    #[error("the navigation stack is empty")]
    EmptyStack,

    /// Remove requested for a view-model that is not presented.
    #[error("view model '{view_model}' is not on the navigation stack")]
    ItemNotFound { view_model: String },

    /// The factory has no constructor for the requested view-model type.
    #[error("no constructor registered for view model type '{type_name}'")]
    ViewModelCreation { type_name: String },

    /// Any other failure reported by the host navigation adapter.
    #[error("host navigation failed: {0}")]
    Host(#[from] anyhow::Error),
}

impl NavigationError {
    pub(crate) fn resolution(
        view_model: impl Into<String>,
        contract: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        NavigationError::ViewResolution {
            view_model: view_model.into(),
            contract: contract.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// True for errors raised before any host call was made
    pub fn is_fail_fast(&self) -> bool {
        matches!(
            self,
            NavigationError::ViewResolution { .. } | NavigationError::ViewModelCreation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NavigationError>;
