use crate::domain_port::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    #[error("user not found")]
    UserNotFound,
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
    #[error("action not permitted")]
    NotPermitted,
    #[error("users are already friends")]
    AlreadyFriends,
    #[error("requestor has already subscribed to this target")]
    AlreadySubscribed,
    #[error("requestor has already blocked this target")]
    AlreadyBlocked,
    #[error("blocked: {0}")]
    IsBlocked(&'static str),
    #[error("cannot block a friend without subscribing first")]
    NotSubscribed,
    #[error("store error: {0}")]
    Store(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RelationErrorKind {
    UserNotFound,
    InvalidRequest,
    NotPermitted,
    AlreadyFriends,
    AlreadySubscribed,
    AlreadyBlocked,
    IsBlocked,
    NotSubscribed,
    Store,
}

impl RelationError {
    pub fn kind(&self) -> RelationErrorKind {
        match self {
            RelationError::UserNotFound => RelationErrorKind::UserNotFound,
            RelationError::InvalidRequest(_) => RelationErrorKind::InvalidRequest,
            RelationError::NotPermitted => RelationErrorKind::NotPermitted,
            RelationError::AlreadyFriends => RelationErrorKind::AlreadyFriends,
            RelationError::AlreadySubscribed => RelationErrorKind::AlreadySubscribed,
            RelationError::AlreadyBlocked => RelationErrorKind::AlreadyBlocked,
            RelationError::IsBlocked(_) => RelationErrorKind::IsBlocked,
            RelationError::NotSubscribed => RelationErrorKind::NotSubscribed,
            RelationError::Store(_) => RelationErrorKind::Store,
        }
    }
}

// Callers that expect a uniqueness violation match `RepoError::AlreadyExists`
// themselves before falling back to this conversion.
impl From<RepoError> for RelationError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::AlreadyExists => RelationError::Store("unexpected duplicate row".to_string()),
            RepoError::Store(e) => RelationError::Store(e),
        }
    }
}

impl From<anyhow::Error> for RelationError {
    fn from(err: anyhow::Error) -> Self {
        RelationError::Store(err.to_string())
    }
}
