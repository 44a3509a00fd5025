use backend_test_support::unique_helpers::unique_module_name;
use turnstile_backend::adapters::modules_sea::{self, ModuleCreate};
use turnstile_backend::db::require_db;
use turnstile_backend::errors::domain::{ConflictKind, DomainError};
use turnstile_backend::infra::db_errors::map_db_err;
use turnstile_backend::AppError;

use crate::support::test_state::build_test_state;

#[tokio::test]
async fn duplicate_name_maps_to_unique_name() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let name = unique_module_name();
    modules_sea::create(db, ModuleCreate::new(name.clone())).await?;
    let err = modules_sea::create(db, ModuleCreate::new(name))
        .await
        .unwrap_err();

    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::UniqueName, _)
    ));
    Ok(())
}

#[tokio::test]
async fn crud_round() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let a = modules_sea::create(db, ModuleCreate::new("A")).await?;
    let b = modules_sea::create(db, ModuleCreate::new("B")).await?;
    assert_eq!(modules_sea::count(db).await?, 2);

    let found = modules_sea::find_by_name(db, "B").await?.expect("B");
    assert_eq!(found.id, b.id);

    // On SQLite the lock is a no-op write; the row is unchanged
    let locked = modules_sea::find_by_id_for_update(db, a.id).await?.expect("A");
    assert_eq!(locked.name, "A");

    let renamed = modules_sea::update_name(db, a.id, "A2").await?.expect("A2");
    assert_eq!(renamed.name, "A2");
    assert!(modules_sea::update_name(db, 9_999, "ghost").await?.is_none());

    let names: Vec<String> = modules_sea::list(db).await?.into_iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["A2", "B"]);

    assert_eq!(modules_sea::delete(db, a.id).await?, 1);
    assert_eq!(modules_sea::delete(db, a.id).await?, 0);
    assert_eq!(modules_sea::delete_all(db).await?, 1);
    Ok(())
}
