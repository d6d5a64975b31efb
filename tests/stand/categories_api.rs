//! Categories through the REST gateway

use super::Stand;
use niffler_e2e::fixtures::data::unique_username;
use niffler_e2e::AddCategoryOutcome;

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_add_category() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let name = unique_username("category");

    let category = ctx
        .spends
        .add_category(&name)
        .await
        .unwrap()
        .created()
        .unwrap();

    assert_eq!(category.name, name);
    assert_eq!(category.username, ctx.test_username());
    assert!(!category.archived);
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_duplicate_category_is_a_conflict() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let name = unique_username("duplicate");

    ctx.spends.add_category(&name).await.unwrap().created().unwrap();
    let outcome = ctx.spends.add_category(&name).await.unwrap();

    match outcome {
        AddCategoryOutcome::Conflict(problem) => {
            assert_eq!(problem.status, 409);
            assert!(problem.detail.contains(&name), "detail: {}", problem.detail);
        }
        AddCategoryOutcome::Created(category) => {
            panic!("duplicate category was created: {:?}", category)
        }
    }
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_rename_and_archive_category() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;

    let mut category = ctx
        .spends
        .add_category(&unique_username("before"))
        .await
        .unwrap()
        .created()
        .unwrap();
    category.name = unique_username("after");
    category.archived = true;

    let updated = ctx.spends.update_category(&category).await.unwrap();
    assert_eq!(updated.name, category.name);
    assert!(updated.archived);

    let active = ctx.spends.get_all_categories(true).await.unwrap();
    assert!(active.iter().all(|c| c.id != category.id));

    let found = ctx
        .spends
        .get_category_by_name(&category.name)
        .await
        .unwrap()
        .unwrap();
    assert!(found.archived);
    stand.finish().await;
}
