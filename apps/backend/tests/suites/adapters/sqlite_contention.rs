use sea_orm::TransactionTrait;
use turnstile_backend::adapters::{modules_sea, turns_sea};
use turnstile_backend::adapters::turns_sea::TurnCreate;
use turnstile_backend::db::require_db;
use turnstile_backend::errors::domain::{ConflictKind, DomainError};
use turnstile_backend::infra::db_errors::map_db_err;
use turnstile_backend::AppError;

use crate::support::factory::seed_module;
use crate::support::test_state::build_sqlite_file_state;

#[tokio::test]
async fn write_after_read_under_contention_is_retryable_conflict() -> Result<(), AppError> {
    let state = build_sqlite_file_state().await?;
    let db = require_db(&state)?;
    let turn = turns_sea::create(db, TurnCreate::new("TRN-1")).await?;

    // Reader holds a shared lock, writer then takes the write lock
    let reader = db.begin().await?;
    turns_sea::count(&reader).await?;
    let writer = db.begin().await?;
    turns_sea::set_used(&writer, turn.id, true).await?;

    // Upgrading the reader cannot wait for the writer
    let err = turns_sea::set_used(&reader, turn.id, true)
        .await
        .expect_err("lock upgrade must be refused");
    let mapped = map_db_err(err);
    assert!(
        matches!(mapped, DomainError::Conflict(ConflictKind::Busy, _)),
        "{mapped:?}"
    );

    let app: AppError = mapped.into();
    assert_eq!(app.code().as_str(), "DB_BUSY");
    assert_eq!(app.status().as_u16(), 409);

    reader.rollback().await?;
    writer.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn module_lock_waits_for_the_holder() -> Result<(), AppError> {
    let state = build_sqlite_file_state().await?;
    let db = require_db(&state)?;
    let module = seed_module(db, "locked").await?;

    let holder = db.begin().await?;
    assert!(modules_sea::find_by_id_for_update(&holder, module.id).await?.is_some());

    let waiter = db.begin().await?;
    let release = async {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        holder.commit().await
    };
    // A lock taken as the first statement waits on busy_timeout instead of failing
    let (released, waited) = tokio::join!(
        release,
        modules_sea::find_by_id_for_update(&waiter, module.id)
    );
    released?;
    assert_eq!(waited?.map(|m| m.id), Some(module.id));
    waiter.commit().await?;
    Ok(())
}
