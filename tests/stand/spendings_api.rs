//! Spendings through the REST gateway

use super::Stand;
use niffler_e2e::fixtures::data::generate_spendings;
use niffler_e2e::fixtures::delete_spendings_lock;

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_add_and_get_spending() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;

    let spend = generate_spendings(1, ctx.test_username()).remove(0);
    let added = ctx.spends.add_spending(spend.clone()).await.unwrap();

    assert_eq!(added.description, spend.description);
    assert_eq!(Some(added.amount), spend.amount);
    assert_eq!(added.currency, spend.currency);
    assert_eq!(added.username, ctx.test_username());

    let fetched = ctx.spends.get_spending_by_id(&added.id).await.unwrap();
    assert_eq!(fetched.id, added.id);
    assert_eq!(fetched.description, added.description);
    assert_eq!(fetched.category.name, added.category.name);

    ctx.spends
        .clear_spendings(Some(vec![added.id.clone()]))
        .await
        .unwrap();
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_update_spending() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;

    let spend = generate_spendings(1, ctx.test_username()).remove(0);
    let added = ctx.spends.add_spending(spend).await.unwrap();

    let mut edit = added.to_edit();
    edit.description = format!("{} (edited)", added.description);
    edit.amount = Some(added.amount + 1.0);
    let updated = ctx.spends.update_spending(&edit).await.unwrap();

    assert_eq!(updated.id, added.id);
    assert_eq!(updated.description, edit.description);
    assert_eq!(Some(updated.amount), edit.amount);

    ctx.spends
        .clear_spendings(Some(vec![added.id.clone()]))
        .await
        .unwrap();
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_delete_all_spendings() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let lock = delete_spendings_lock(&ctx.locks).await.unwrap();

    for spend in generate_spendings(3, ctx.test_username()) {
        ctx.spends.add_spending(spend).await.unwrap();
    }
    assert!(ctx.spends.get_all_spendings().await.unwrap().len() >= 3);

    ctx.spends.clear_spendings(None).await.unwrap();
    assert!(ctx.spends.get_all_spendings().await.unwrap().is_empty());

    lock.release().unwrap();
    stand.finish().await;
}
