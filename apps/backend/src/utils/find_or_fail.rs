//! Turn "maybe a row" lookups into domain not-found errors.

use std::future::Future;

use crate::errors::domain::{DomainError, NotFoundKind};

/// Await a lookup and fail with `NotFound(kind)` when it yields nothing.
///
/// ```ignore
/// let module = find_or_not_found(
///     modules_repo::find_by_id(txn, id),
///     NotFoundKind::Module,
///     format!("Module {id} not found"),
/// )
/// .await?;
/// ```
pub async fn find_or_not_found<T, Fut>(
    lookup: Fut,
    kind: NotFoundKind,
    detail: impl Into<String>,
) -> Result<T, DomainError>
where
    Fut: Future<Output = Result<Option<T>, DomainError>>,
{
    lookup
        .await?
        .ok_or_else(|| DomainError::not_found(kind, detail))
}
