//! MongoDB integration tests for users (require Docker)

use domain_users::*;
use test_utils::{TestDataBuilder, TestMongo};

fn create(builder: &TestDataBuilder, suffix: &str, index: u64) -> CreateUser {
    CreateUser {
        full_name: Some(builder.name("user", suffix)),
        email: Some(builder.email(suffix)),
        phone: Some(builder.phone(index)),
        dob: Some("1990-01-01".into()),
        password: Some("secret".into()),
        confirm_password: Some("secret".into()),
        gender: Some("other".into()),
        country: Some("IN".into()),
        agree: Some(true),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_register_update_login_delete() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("test_register_update_login_delete");
    let db = mongo.database(&builder.database_name());

    let repository = MongoUserRepository::new(&db);
    repository.init_indexes().await.unwrap();
    let service = UserService::new(repository);

    let registered = service
        .register_users(vec![create(&builder, "a", 0), create(&builder, "b", 1)])
        .await
        .unwrap();
    assert_eq!(registered, 2);

    let users = service.list_users().await.unwrap();
    let id = users[0].id.clone();

    let clash = service
        .update_user(UpdateUser {
            id: Some(id.clone()),
            email: Some(builder.email("b")),
            ..Default::default()
        })
        .await;
    assert!(matches!(clash, Err(UserError::EmailTaken(_))));

    service
        .update_user(UpdateUser {
            id: Some(id.clone()),
            password: Some("rotated".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let logged_in = service
        .login(Some(builder.email("a")), Some("rotated".into()))
        .await
        .unwrap();
    assert_eq!(logged_in.id, id);

    service.delete_user(Some(id.clone())).await.unwrap();
    assert!(matches!(
        service.get_user(Some(&id)).await,
        Err(UserError::NotFound)
    ));
}
