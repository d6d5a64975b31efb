//! Users and friendships through the userdata SOAP endpoint

use super::Stand;
use niffler_e2e::fixtures::data::unique_username;
use niffler_e2e::fixtures::CreatedUsers;
use niffler_e2e::models::validation::{PAGE_INDEX_NEGATIVE, PAGE_SIZE_TOO_SMALL};
use niffler_e2e::models::{PageInfo, SoapUser};

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_current_user() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;

    let user = ctx
        .soap
        .get_current_user(ctx.test_username())
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert!(user.id.is_some());
    assert_eq!(user.username.as_deref(), Some(ctx.test_username()));
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_current_user_that_does_not_exist() {
    let stand = Stand::start().await;
    let ghost = unique_username("ghost");

    let user = stand
        .ctx
        .soap
        .get_current_user(&ghost)
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert_eq!(user.id, None);
    assert_eq!(user.username.as_deref(), Some(ghost.as_str()));
    assert_eq!(user.currency.as_deref(), Some("RUB"));
    assert_eq!(user.friendship_status.as_deref(), Some("VOID"));
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_update_user_full_name() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let creator = ctx.user_creator();
    let users = creator.create_users(1, CreatedUsers::Plain).await.unwrap();

    let current = ctx
        .soap
        .get_current_user(&users[0].username)
        .await
        .unwrap()
        .into_value()
        .unwrap();
    let updated = ctx
        .soap
        .update_user(&SoapUser {
            full_name: Some("Scrooge McDuck".to_string()),
            currency: Some("USD".to_string()),
            ..current
        })
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert_eq!(updated.full_name.as_deref(), Some("Scrooge McDuck"));
    assert_eq!(updated.currency.as_deref(), Some("USD"));

    creator.delete_users(&users).await.unwrap();
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_all_users_contain_created_users() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let creator = ctx.user_creator();
    let users = creator.create_users(3, CreatedUsers::Plain).await.unwrap();

    let all = ctx
        .soap
        .get_all_users(ctx.test_username(), None)
        .await
        .unwrap()
        .into_value()
        .unwrap();
    let names: Vec<_> = all.iter().filter_map(|u| u.username.as_deref()).collect();

    for user in &users {
        assert!(names.contains(&user.username.as_str()), "{} missing", user.username);
    }
    assert!(!names.contains(&ctx.test_username()));

    creator.delete_users(&users).await.unwrap();
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_all_users_pagination() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let creator = ctx.user_creator();
    let users = creator.create_users(5, CreatedUsers::Plain).await.unwrap();

    let page = ctx
        .soap
        .get_all_users_page(ctx.test_username(), &PageInfo::new(1, 2), None)
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(page.size, 2);
    assert_eq!(page.number, 1);
    assert_eq!(page.users.len(), 2);
    assert!(page.total_elements >= 5);

    let beyond = ctx
        .soap
        .get_all_users_page(ctx.test_username(), &PageInfo::new(1000, 2), None)
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert!(beyond.users.is_empty());

    creator.delete_users(&users).await.unwrap();
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_invalid_paging_faults() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;

    for page_info in [PageInfo::new(-1, 10), PageInfo::new(0, 0)] {
        let reply = ctx
            .soap
            .get_all_users_page(ctx.test_username(), &page_info, None)
            .await
            .unwrap();
        assert_eq!(reply.fault(), page_info.expected_fault());
    }
    assert_eq!(PageInfo::new(-1, 10).expected_fault(), Some(PAGE_INDEX_NEGATIVE));
    assert_eq!(PageInfo::new(0, 0).expected_fault(), Some(PAGE_SIZE_TOO_SMALL));
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_friends_of_user() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let creator = ctx.user_creator();
    let owner = creator.create_users(1, CreatedUsers::Plain).await.unwrap();
    let friends = creator
        .create_users(2, CreatedUsers::FriendsOf(&owner[0].username))
        .await
        .unwrap();

    let listed = ctx
        .soap
        .get_friends(&owner[0].username, None)
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert_eq!(listed.len(), 2);
    assert!(listed
        .iter()
        .all(|u| u.friendship_status.as_deref() == Some("FRIEND")));

    creator.delete_users(&friends).await.unwrap();
    creator.delete_users(&owner).await.unwrap();
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_invitation_accept_decline_and_remove() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let creator = ctx.user_creator();
    let users = creator.create_users(3, CreatedUsers::Plain).await.unwrap();
    let (me, accepted, declined) = (&users[0].username, &users[1].username, &users[2].username);

    ctx.soap.send_friend_invitation(accepted, me).await.unwrap().into_value().unwrap();
    ctx.soap.send_friend_invitation(declined, me).await.unwrap().into_value().unwrap();

    let friend = ctx
        .soap
        .accept_friend_invitation(me, accepted)
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(friend.friendship_status.as_deref(), Some("FRIEND"));

    let stranger = ctx
        .soap
        .decline_friend_invitation(me, declined)
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(stranger.friendship_status.as_deref(), Some("VOID"));

    let removed = ctx.soap.remove_friend(me, accepted).await.unwrap();
    assert_eq!(removed.status, 200);

    let friends = ctx
        .soap
        .get_friends(me, None)
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert!(friends.iter().all(|u| u.username.as_deref() != Some(accepted.as_str())));

    creator.delete_users(&users).await.unwrap();
    stand.finish().await;
}
