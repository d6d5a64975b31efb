//! Direct checks against the stand databases

use super::Stand;
use niffler_e2e::fixtures::data::unique_username;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_added_category_is_stored() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let name = unique_username("stored");

    let category = ctx.spends.add_category(&name).await.unwrap().created().unwrap();

    let rows = ctx
        .spends_db
        .get_user_categories(ctx.test_username())
        .await
        .unwrap();
    let row = rows.iter().find(|r| r.name == name).unwrap();
    assert_eq!(row.id, Uuid::parse_str(&category.id).unwrap());
    assert!(!row.archived);
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_updated_category_is_stored() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;

    let mut category = ctx
        .spends
        .add_category(&unique_username("old"))
        .await
        .unwrap()
        .created()
        .unwrap();
    category.name = unique_username("new");
    category.archived = true;
    ctx.spends.update_category(&category).await.unwrap();

    let id = Uuid::parse_str(&category.id).unwrap();
    let rows = ctx
        .spends_db
        .get_user_categories(ctx.test_username())
        .await
        .unwrap();
    let row = rows.iter().find(|r| r.id == id).unwrap();
    assert_eq!(row.name, category.name);
    assert!(row.archived);

    assert!(ctx.spends_db.delete_category(id).await.unwrap());
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_test_user_exists_in_both_user_stores() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;

    let userdata = ctx
        .userdata_db
        .get_user_by_name(ctx.test_username())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(userdata.username, ctx.test_username());

    let auth = ctx
        .auth_db
        .get_user_by_name(ctx.test_username())
        .await
        .unwrap()
        .unwrap();
    assert!(auth.enabled);
    stand.finish().await;
}
