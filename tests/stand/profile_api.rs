//! Current user profile through the REST gateway

use super::Stand;
use niffler_e2e::fixtures::profile_name_lock;

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_update_profile_name() {
    let stand = Stand::start().await;
    let ctx = &stand.ctx;
    let lock = profile_name_lock(&ctx.locks).await.unwrap();

    let name = format!("Scrooge {}", std::process::id());
    ctx.users.update_profile_name(&name).await.unwrap();

    let user = ctx.users.get_current_user().await.unwrap();
    assert_eq!(user.username, ctx.test_username());
    assert_eq!(user.fullname.as_deref(), Some(name.as_str()));

    lock.release().unwrap();
    stand.finish().await;
}
