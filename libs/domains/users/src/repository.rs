use async_trait::async_trait;
use pagination::{PageRequest, PageResult, SortOrder, sort_by_orders};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use value_objects::ResourceId;

use crate::error::UserResult;
use crate::models::{User, UserFilter};

/// Repository trait for User persistence.
///
/// Users are deactivated, never deleted, so there is no delete operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user, assigning an identifier to an unsaved one
    async fn save(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn find_by_id(&self, id: ResourceId) -> UserResult<Option<User>>;

    /// Get a user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// List one page of users, optionally filtered by example
    async fn find_all(
        &self,
        filter: Option<UserFilter>,
        page: PageRequest,
    ) -> UserResult<PageResult<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<ResourceId, User>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

const SORTABLE: &[&str] = &[
    "id",
    "email",
    "firstName",
    "first_name",
    "lastName",
    "last_name",
    "createdAt",
    "created_at",
];

fn compare_by(a: &User, b: &User, property: &str) -> Ordering {
    match property {
        "id" => a.id().cmp(&b.id()),
        "email" => a.email().value().cmp(b.email().value()),
        "firstName" | "first_name" => a.first_name().cmp(b.first_name()),
        "lastName" | "last_name" => a.last_name().cmp(b.last_name()),
        "createdAt" | "created_at" => a.created_at().cmp(&b.created_at()),
        _ => Ordering::Equal,
    }
}

fn sort_users(users: &mut [User], orders: &[SortOrder]) {
    for property in sort_by_orders(users, orders, SORTABLE, compare_by) {
        tracing::debug!(property = %property, "Ignoring unknown sort property");
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: User) -> UserResult<User> {
        let saved = if user.id().is_persisted() {
            self.next_id
                .fetch_max(user.id().value().saturating_add(1), AtomicOrdering::SeqCst);
            user
        } else {
            let id = ResourceId::new(self.next_id.fetch_add(1, AtomicOrdering::SeqCst));
            user.with_id(id)
        };

        let mut users = self.users.write().await;
        users.insert(saved.id(), saved.clone());

        tracing::debug!(user_id = %saved.id(), "Saved user");
        Ok(saved)
    }

    async fn find_by_id(&self, id: ResourceId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email().value().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_all(
        &self,
        filter: Option<UserFilter>,
        page: PageRequest,
    ) -> UserResult<PageResult<User>> {
        let users = self.users.read().await;

        let mut matching: Vec<User> = users
            .values()
            .filter(|u| filter.as_ref().is_none_or(|f| f.matches(u)))
            .cloned()
            .collect();
        drop(users);

        sort_users(&mut matching, &page.sort);

        let total = matching.len() as u64;
        let items = page.slice(matching);
        Ok(PageResult::from_raw(items, total, page.page, page.size))
    }
}
