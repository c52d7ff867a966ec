use crate::application_port::RelationError;
use crate::domain_model::*;
use crate::domain_port::{RepoError, StorageTx, UserRepo};
use crate::logger::*;

pub(crate) async fn resolve_user(
    user_repo: &dyn UserRepo,
    email: &str,
) -> Result<UserRecord, RelationError> {
    user_repo
        .get_by_email(email)
        .await?
        .ok_or(RelationError::UserNotFound)
}

pub(crate) fn ensure_distinct(a: &UserRecord, b: &UserRecord) -> Result<(), RelationError> {
    if a.user_id == b.user_id {
        return Err(RelationError::InvalidRequest("the two emails must differ"));
    }
    Ok(())
}

/// Loads user rows for `ids`, keeping their order.
pub(crate) async fn materialize(
    user_repo: &dyn UserRepo,
    ids: &[UserId],
) -> Result<Vec<UserRecord>, RelationError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let users = user_repo.get_by_ids(ids).await?;
    if users.len() != ids.len() {
        warn!(
            requested = ids.len(),
            found = users.len(),
            "skipped relationship ids with no user row"
        );
    }
    Ok(users)
}

/// Commits `tx` when `result` is ok, rolls it back otherwise. A unique key
/// lost to a concurrent commit is reported as `duplicate`.
pub(crate) async fn finish_tx<'t>(
    tx: Box<dyn StorageTx<'t> + 't>,
    result: Result<(), RelationError>,
    duplicate: fn() -> RelationError,
) -> Result<(), RelationError> {
    match result {
        Ok(()) => tx.commit().await.map_err(|e| {
            if matches!(e.downcast_ref::<RepoError>(), Some(RepoError::AlreadyExists)) {
                duplicate()
            } else {
                e.into()
            }
        }),
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("rollback after `{e}` failed: {rollback_err}");
            }
            Err(e)
        }
    }
}
