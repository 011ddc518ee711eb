//! In-memory user store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use campusdesk_core::error::AppError;
use campusdesk_core::result::AppResult;
use campusdesk_entity::user::{User, UserRole};

use crate::store::{UserStore, missing};

/// User store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    rows: DashMap<Uuid, User>,
    write: Mutex<()>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn email_taken(&self, email: &str, except: Uuid) -> bool {
        self.rows
            .iter()
            .any(|r| r.id != except && r.email.eq_ignore_ascii_case(email))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim();
        Ok(self
            .rows
            .iter()
            .find(|r| r.email.eq_ignore_ascii_case(email))
            .map(|r| r.clone()))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.rows.iter().map(|r| r.clone()).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));
        Ok(users)
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let _guard = self.write.lock().await;
        if self.email_taken(&user.email, user.id) {
            return Err(AppError::conflict(format!(
                "Email '{}' already exists",
                user.email
            )));
        }
        self.rows.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let _guard = self.write.lock().await;
        if self.email_taken(&user.email, user.id) {
            return Err(AppError::conflict(format!(
                "Email '{}' already exists",
                user.email
            )));
        }
        let mut row = self.rows.get_mut(&user.id).ok_or_else(|| missing("User", user.id))?;
        let password_hash = std::mem::take(&mut row.password_hash);
        *row = User {
            password_hash,
            ..user.clone()
        };
        Ok(row.clone())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let mut row = self.rows.get_mut(&id).ok_or_else(|| missing("User", id))?;
        row.password_hash = password_hash.to_string();
        row.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.rows.len() as i64)
    }

    async fn count_by_roles(&self, roles: &[UserRole]) -> AppResult<i64> {
        Ok(self.rows.iter().filter(|r| roles.contains(&r.role)).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::ErrorKind;
    use campusdesk_entity::user::CreateUser;

    fn user(email: &str, role: UserRole) -> User {
        User::from_create(CreateUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: email.to_string(),
            role,
            department: None,
        })
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.create(&user("a@campus.edu", UserRole::Admin)).await.unwrap();
        let err = store
            .create(&user("A@campus.edu", UserRole::Staff))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_password_hash() {
        let store = MemoryUserStore::new();
        let mut u = store.create(&user("a@campus.edu", UserRole::Staff)).await.unwrap();
        u.password_hash = "something-else".to_string();
        u.name = "Renamed".to_string();
        let updated = store.update(&u).await.unwrap();
        assert_eq!(updated.password_hash, "hash");
        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn test_count_by_roles() {
        let store = MemoryUserStore::new();
        store.create(&user("a@campus.edu", UserRole::Admin)).await.unwrap();
        store.create(&user("h@campus.edu", UserRole::Hod)).await.unwrap();
        store.create(&user("f@campus.edu", UserRole::Faculty)).await.unwrap();
        let n = store
            .count_by_roles(&[UserRole::Admin, UserRole::Hod])
            .await
            .unwrap();
        assert_eq!(n, 2);
    }
}
