//! Loads a demo fixture graph into the database: a handful of users, a hub
//! user with four reciprocated friendships, two one-directional edges, a few
//! posts, a comment, and some likes. Failures are logged and skipped so the
//! seed can be re-run against a partially populated database.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use moment_api::config::AppConfig;
use moment_api::models::{NewComment, NewFriendship, NewLike, NewPost, NewUser, Post, User};
use moment_api::schema::{comments, friendships, likes, posts, users};
use moment_api::services::{auth_service, friend_service};

fn create_user(conn: &mut PgConnection, username: &str, email: &str, password: &str) -> Option<User> {
    let password_hash = match auth_service::hash_password(password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, username, "password hashing failed");
            return None;
        }
    };

    let new_user = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
    };

    match diesel::insert_into(users::table).values(&new_user).get_result::<User>(conn) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!(error = %e, username, "failed to create user");
            None
        }
    }
}

fn set_status(conn: &mut PgConnection, user_id: Uuid, status: &str) {
    if let Err(e) = diesel::update(users::table.find(user_id))
        .set(users::status_message.eq(status))
        .execute(conn)
    {
        tracing::warn!(error = %e, user_id = %user_id, "failed to update status");
    }
}

fn add_friend(conn: &mut PgConnection, user_id: Uuid, friend_id: Uuid) {
    let edge = NewFriendship { user_id, friend_id };
    if let Err(e) = diesel::insert_into(friendships::table).values(&edge).execute(conn) {
        tracing::warn!(error = %e, user_id = %user_id, friend_id = %friend_id, "failed to add friend");
    }
}

fn create_post(conn: &mut PgConnection, user_id: Uuid, image_path: &str, caption: &str) -> Option<Post> {
    let new_post = NewPost {
        user_id,
        image_path: image_path.to_string(),
        caption: Some(caption.to_string()),
    };

    match diesel::insert_into(posts::table).values(&new_post).get_result::<Post>(conn) {
        Ok(post) => Some(post),
        Err(e) => {
            tracing::warn!(error = %e, user_id = %user_id, "failed to create post");
            None
        }
    }
}

fn add_comment(conn: &mut PgConnection, post_id: Uuid, user_id: Uuid, body: &str) {
    let new_comment = NewComment {
        post_id,
        user_id,
        body: body.to_string(),
    };
    if let Err(e) = diesel::insert_into(comments::table).values(&new_comment).execute(conn) {
        tracing::warn!(error = %e, post_id = %post_id, "failed to add comment");
    }
}

fn like_post(conn: &mut PgConnection, post_id: Uuid, user_id: Uuid) {
    let new_like = NewLike { post_id, user_id };
    if let Err(e) = diesel::insert_into(likes::table).values(&new_like).execute(conn) {
        tracing::warn!(error = %e, post_id = %post_id, user_id = %user_id, "failed to like post");
    }
}

fn main() -> anyhow::Result<()> {
    moment_shared::middleware::init_tracing("moment-seed");

    let config = AppConfig::load()?;
    let mut conn = PgConnection::establish(&config.database_url)?;

    let alice = create_user(&mut conn, "alice", "alice@example.com", "password123");
    let bob = create_user(&mut conn, "bob", "bob@example.com", "securepass9");
    let carol = create_user(&mut conn, "carol", "carol@example.com", "carolpass1");
    let dan = create_user(&mut conn, "dan", "dan@example.com", "danpass123");
    let erin = create_user(&mut conn, "erin", "erin@example.com", "erinpass12");
    let frank = create_user(&mut conn, "frank", "frank@example.com", "frankpass3");

    let (Some(alice), Some(bob), Some(carol), Some(dan), Some(erin), Some(frank)) =
        (alice, bob, carol, dan, erin, frank)
    else {
        anyhow::bail!("failed to create seed users");
    };

    set_status(&mut conn, alice.id, "Enjoying life!");
    set_status(&mut conn, frank.id, "On vacation!");

    let post1 = create_post(&mut conn, carol.id, "2025/5/29/demo/first.png", "My first photo!");
    let post2 = create_post(&mut conn, bob.id, "2025/5/29/demo/great-day.jpg", "Great day!");

    // carol is the hub: four reciprocated friendships
    add_friend(&mut conn, carol.id, bob.id);
    add_friend(&mut conn, carol.id, dan.id);
    add_friend(&mut conn, carol.id, erin.id);
    add_friend(&mut conn, carol.id, frank.id);
    add_friend(&mut conn, bob.id, carol.id);
    add_friend(&mut conn, dan.id, carol.id);
    add_friend(&mut conn, erin.id, carol.id);
    add_friend(&mut conn, frank.id, carol.id);

    // one-directional: never reciprocated, never mutual
    add_friend(&mut conn, bob.id, alice.id);
    add_friend(&mut conn, frank.id, alice.id);

    if let Some(post1) = &post1 {
        add_comment(&mut conn, post1.id, bob.id, "Great shot!");
        like_post(&mut conn, post1.id, bob.id);
    }
    if let Some(post2) = &post2 {
        like_post(&mut conn, post2.id, alice.id);
    }

    let carol_friends = friend_service::mutual_friends(&mut conn, carol.id)
        .map_err(|e| anyhow::anyhow!("mutual friend query failed: {e}"))?;
    tracing::info!(count = carol_friends.len(), "carol's mutual friends after seeding");

    let alice_friends = friend_service::mutual_friends(&mut conn, alice.id)
        .map_err(|e| anyhow::anyhow!("mutual friend query failed: {e}"))?;
    tracing::info!(count = alice_friends.len(), "alice's mutual friends after seeding");

    tracing::info!("seed complete");
    Ok(())
}
