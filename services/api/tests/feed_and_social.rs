//! Integration tests for feed composition, the social graph, and likes
//!
//! These tests need a reachable PostgreSQL instance and are skipped when
//! `DATABASE_URL` is not set. Each test creates its own users so runs are
//! independent.

use api::MIGRATOR;
use api::models::{NewActivity, NewComment, UpdateActivity, User};
use api::repositories::{
    ActivityRepository, CommentRepository, SocialRepository, UserRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping integration test");
            return None;
        }
    };

    let pool = PgPool::connect(&url).await.expect("failed to connect");
    MIGRATOR.run(&pool).await.expect("failed to run migrations");
    Some(pool)
}

async fn create_test_user(users: &UserRepository) -> User {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user_{}", &suffix[..12]);
    let email = format!("{}@example.com", username);

    users
        .create(&username, &email, "a-test-password", None)
        .await
        .expect("failed to create user")
}

fn sample_activity(title: &str) -> NewActivity {
    NewActivity {
        title: title.to_string(),
        activity_type: "Stargazing".to_string(),
        description: "A quiet night under the stars".to_string(),
        latitude: Some(37.8651),
        longitude: Some(-119.5383),
        location_name: Some("Yosemite".to_string()),
        datetime: None,
        photos: None,
    }
}

#[tokio::test]
async fn test_password_verification() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool);

    let user = create_test_user(&users).await;
    assert!(users.verify_password(&user, "a-test-password").unwrap());
    assert!(!users.verify_password(&user, "wrong-password").unwrap());
    assert_ne!(user.password_hash, "a-test-password");
}

#[tokio::test]
async fn test_duplicate_follow_rejected() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());
    let social = SocialRepository::new(pool);

    let alice = create_test_user(&users).await;
    let bob = create_test_user(&users).await;

    assert!(social.follow(alice.id, bob.id).await.unwrap());
    assert!(!social.follow(alice.id, bob.id).await.unwrap());

    let followers = social.followers(bob.id).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, alice.id);

    let following = social.following(alice.id).await.unwrap();
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].id, bob.id);

    assert!(social.unfollow(alice.id, bob.id).await.unwrap());
    // Unfollowing a non-existent edge is rejected.
    assert!(!social.unfollow(alice.id, bob.id).await.unwrap());
}

#[tokio::test]
async fn test_like_unlike_round_trip() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());
    let activities = ActivityRepository::new(pool.clone());
    let social = SocialRepository::new(pool);

    let author = create_test_user(&users).await;
    let fan = create_test_user(&users).await;
    let activity = activities
        .create(author.id, &sample_activity("Night sky"))
        .await
        .unwrap();

    assert!(social.like(fan.id, activity.id).await.unwrap());
    // Liking the same activity twice is rejected.
    assert!(!social.like(fan.id, activity.id).await.unwrap());

    let view = activities
        .view_by_id(activity.id, Some(fan.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.like_count, 1);
    assert!(view.user_liked);
    assert_eq!(view.liked_by.len(), 1);
    assert_eq!(view.liked_by[0].id, fan.id);

    assert!(social.unlike(fan.id, activity.id).await.unwrap());
    assert!(!social.unlike(fan.id, activity.id).await.unwrap());

    let view = activities
        .view_by_id(activity.id, Some(fan.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.like_count, 0);
    assert!(!view.user_liked);
}

#[tokio::test]
async fn test_liker_preview_capped_at_five() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());
    let activities = ActivityRepository::new(pool.clone());
    let social = SocialRepository::new(pool);

    let author = create_test_user(&users).await;
    let activity = activities
        .create(author.id, &sample_activity("Popular post"))
        .await
        .unwrap();

    for _ in 0..7 {
        let fan = create_test_user(&users).await;
        assert!(social.like(fan.id, activity.id).await.unwrap());
    }

    let view = activities
        .view_by_id(activity.id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.like_count, 7);
    assert_eq!(view.liked_by.len(), 5);
    assert!(!view.user_liked);
}

#[tokio::test]
async fn test_feed_filtered_by_follow_graph() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());
    let activities = ActivityRepository::new(pool.clone());
    let social = SocialRepository::new(pool);

    let viewer = create_test_user(&users).await;
    let followed = create_test_user(&users).await;
    let stranger = create_test_user(&users).await;

    social.follow(viewer.id, followed.id).await.unwrap();

    let own = activities
        .create(viewer.id, &sample_activity("My own walk"))
        .await
        .unwrap();
    let from_followed = activities
        .create(followed.id, &sample_activity("Friend's hike"))
        .await
        .unwrap();
    let from_stranger = activities
        .create(stranger.id, &sample_activity("Stranger's trip"))
        .await
        .unwrap();

    let feed = activities.feed(Some(viewer.id)).await.unwrap();
    let ids: Vec<i64> = feed.iter().map(|v| v.id).collect();

    assert!(ids.contains(&own.id));
    assert!(ids.contains(&from_followed.id));
    assert!(!ids.contains(&from_stranger.id));

    // Without a viewer the timeline is unrestricted.
    let all = activities.feed(None).await.unwrap();
    let all_ids: Vec<i64> = all.iter().map(|v| v.id).collect();
    assert!(all_ids.contains(&from_stranger.id));
}

#[tokio::test]
async fn test_activity_crud_round_trip() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());
    let activities = ActivityRepository::new(pool);

    let author = create_test_user(&users).await;
    let created = activities
        .create(author.id, &sample_activity("Morning swim"))
        .await
        .unwrap();

    let fetched = activities.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Morning swim");
    assert_eq!(fetched.user_id, author.id);

    // Patch one field; everything else is untouched.
    let update = UpdateActivity {
        title: Some("Evening swim".to_string()),
        ..Default::default()
    };
    let updated = activities.update(created.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.title, "Evening swim");
    assert_eq!(updated.description, fetched.description);
    assert_eq!(updated.activity_type, fetched.activity_type);
    assert_eq!(updated.location_name, fetched.location_name);

    assert!(activities.delete(created.id).await.unwrap());
    assert!(activities.find_by_id(created.id).await.unwrap().is_none());
    assert!(!activities.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn test_comment_requires_existing_activity() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());
    let activities = ActivityRepository::new(pool.clone());
    let comments = CommentRepository::new(pool);

    let author = create_test_user(&users).await;
    let activity = activities
        .create(author.id, &sample_activity("Forest bath"))
        .await
        .unwrap();

    let comment = comments
        .create(
            author.id,
            &NewComment {
                content: "Looks so peaceful out there".to_string(),
                activity_id: activity.id,
            },
        )
        .await
        .unwrap()
        .expect("comment should be created");
    assert_eq!(comment.activity_id, activity.id);

    let missing = comments
        .create(
            author.id,
            &NewComment {
                content: "Commenting into the void".to_string(),
                activity_id: i64::MAX,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());

    let view = activities
        .view_by_id(activity.id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.comments.len(), 1);
    assert_eq!(view.comments[0].user.id, author.id);
}

#[tokio::test]
async fn test_user_delete_cascades() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.clone());
    let activities = ActivityRepository::new(pool.clone());
    let social = SocialRepository::new(pool);

    let doomed = create_test_user(&users).await;
    let bystander = create_test_user(&users).await;

    let activity = activities
        .create(doomed.id, &sample_activity("Last post"))
        .await
        .unwrap();
    social.follow(doomed.id, bystander.id).await.unwrap();
    social.like(bystander.id, activity.id).await.unwrap();

    assert!(users.delete(doomed.id).await.unwrap());

    // The user's activities go with them, and the bystander's like row
    // cascades with the activity.
    assert!(activities.find_by_id(activity.id).await.unwrap().is_none());
    assert!(social.following(doomed.id).await.unwrap().is_empty());
    assert!(users.find_by_id(doomed.id).await.unwrap().is_none());
    assert!(users.find_by_id(bystander.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_username_search() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool);

    let user = create_test_user(&users).await;
    // Search on a distinctive chunk of the generated name.
    let needle = &user.username[5..13];

    let found = users.search(needle).await.unwrap();
    assert!(found.iter().any(|u| u.id == user.id));

    let found_upper = users.search(&needle.to_uppercase()).await.unwrap();
    assert!(found_upper.iter().any(|u| u.id == user.id));
}
