//! SQLite-backed persistent graph store.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::graph::PersistentGraphStore;
use crate::models::User;

/// Durable users and follow edges.
#[derive(Debug, Clone)]
pub struct SqliteGraphStore {
    pool: SqlitePool,
}

impl SqliteGraphStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of stored edges `(follower_id, followed_id)`; 0 or 1.
    pub async fn edge_count(&self, follower_id: &str, followed_id: &str) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM follows WHERE follower_id = ? AND followed_id = ?",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

fn into_users(rows: Vec<(String, String)>) -> Vec<User> {
    rows.into_iter()
        .map(|(id, username)| User { id, username })
        .collect()
}

#[async_trait]
impl PersistentGraphStore for SqliteGraphStore {
    async fn follow(&self, follower_id: &str, followed_id: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT OR IGNORE INTO follows (follower_id, followed_id) VALUES (?, ?)")
            .bind(follower_id)
            .bind(followed_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn unfollow(&self, follower_id: &str, followed_id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followed_id = ?")
            .bind(follower_id)
            .bind(followed_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn following(&self, user_id: &str) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT u.id, u.username
             FROM follows f
             JOIN users u ON u.id = f.followed_id
             WHERE f.follower_id = ?
             ORDER BY u.username",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_users(rows))
    }

    async fn followers(&self, user_id: &str) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT u.id, u.username
             FROM follows f
             JOIN users u ON u.id = f.follower_id
             WHERE f.followed_id = ?
             ORDER BY u.username",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_users(rows))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, (String, String)>("SELECT id, username FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, username)| User { id, username }))
    }

    async fn create_user(&self, username: &str) -> Result<User, StoreError> {
        let user = User::new(Uuid::new_v4().to_string(), username);

        let result = sqlx::query("INSERT INTO users (id, username) VALUES (?, ?)")
            .bind(&user.id)
            .bind(&user.username)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::UsernameTaken(user.username))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT id, username FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(into_users(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn store() -> SqliteGraphStore {
        SqliteGraphStore::new(db::connect_in_memory().await.unwrap())
    }

    async fn seed(store: &SqliteGraphStore, names: &[&str]) -> Vec<User> {
        let mut users = Vec::new();
        for name in names {
            users.push(store.create_user(name).await.unwrap());
        }
        users
    }

    #[tokio::test]
    async fn test_follow_is_idempotent() {
        let store = store().await;
        let users = seed(&store, &["alice", "bob"]).await;
        let (a, b) = (&users[0].id, &users[1].id);

        store.follow(a, b).await.unwrap();
        store.follow(a, b).await.unwrap();

        assert_eq!(store.edge_count(a, b).await.unwrap(), 1);
        assert_eq!(store.following(a).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unfollow_missing_edge_is_ok() {
        let store = store().await;
        let users = seed(&store, &["alice", "bob"]).await;
        let (a, b) = (&users[0].id, &users[1].id);

        store.follow(a, b).await.unwrap();
        store.unfollow(a, b).await.unwrap();
        store.unfollow(a, b).await.unwrap();

        assert_eq!(store.edge_count(a, b).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_following_and_followers_are_mirrors() {
        let store = store().await;
        let users = seed(&store, &["alice", "bob", "carol"]).await;
        let (a, b, c) = (&users[0], &users[1], &users[2]);

        store.follow(&a.id, &b.id).await.unwrap();
        store.follow(&a.id, &c.id).await.unwrap();
        store.follow(&c.id, &b.id).await.unwrap();

        assert_eq!(store.following(&a.id).await.unwrap(), vec![b.clone(), c.clone()]);
        assert_eq!(store.followers(&b.id).await.unwrap(), vec![a.clone(), c.clone()]);
        assert!(store.followers(&a.id).await.unwrap().is_empty());
        assert!(store.following(&b.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_user() {
        let store = store().await;
        let users = seed(&store, &["alice"]).await;

        assert_eq!(store.get_user(&users[0].id).await.unwrap(), Some(users[0].clone()));
        assert_eq!(store.get_user("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = store().await;
        seed(&store, &["alice"]).await;

        let result = store.create_user("alice").await;
        assert!(matches!(result, Err(StoreError::UsernameTaken(name)) if name == "alice"));
    }

    #[tokio::test]
    async fn test_list_users_sorted() {
        let store = store().await;
        seed(&store, &["carol", "alice", "bob"]).await;

        let names: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }
}
