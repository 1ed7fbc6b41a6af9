use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use pagination::{PageLimits, PageRequest, PageResult};
use std::sync::Arc;
use tracing::instrument;
use value_objects::{Email, Password, ResourceId};

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, ProfileUpdate, User, UserFilter, UserView};
use crate::repository::UserRepository;

/// Field matched by free-text search in [`UserService::list_users`]
pub const SEARCH_FIELD: &str = "email";

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    limits: PageLimits,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_limits(repository, PageLimits::default())
    }

    pub fn with_limits(repository: R, limits: PageLimits) -> Self {
        Self {
            repository: Arc::new(repository),
            limits,
        }
    }

    /// Register a new user with password hashing
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: NewUser) -> UserResult<UserView> {
        // strength rules apply to the plaintext, storage only sees the hash
        let plaintext = Password::new(input.password)?;
        let email = Email::new(input.email)?;

        if self.repository.find_by_email(email.value()).await?.is_some() {
            return Err(UserError::DuplicateEmail(email.into_inner()));
        }

        let user = User::create(
            email.value(),
            self.hash_password(&plaintext)?,
            input.first_name,
            input.last_name,
            input.phone_number,
            input.role,
        )?;

        let created = self.repository.save(user).await?;
        tracing::info!(user_id = %created.id(), role = %created.role(), "Registered user");
        Ok(created.into())
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: ResourceId) -> UserResult<UserView> {
        self.load(id).await.map(UserView::from)
    }

    /// List users, optionally narrowed by a case-insensitive substring match
    /// on the email
    #[instrument(skip(self, page))]
    pub async fn list_users(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> UserResult<PageResult<UserView>> {
        let page = page.normalize(&self.limits);
        let filter = search
            .filter(|text| !text.trim().is_empty())
            .map(UserFilter::by_email);

        let users = self.repository.find_all(filter, page).await?;
        Ok(users.map(UserView::from))
    }

    /// Change first name, last name or phone number; omitted fields are kept
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, id: ResourceId, update: ProfileUpdate) -> UserResult<UserView> {
        let user = self.load(id).await?;
        let updated = self.repository.save(user.update_profile(update)?).await?;

        tracing::info!(user_id = %id, "Updated user profile");
        Ok(updated.into())
    }

    /// Change user password after checking the current one
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        id: ResourceId,
        current_password: &str,
        new_password: &str,
    ) -> UserResult<()> {
        let user = self.load(id).await?;

        if !self.verify_password(current_password, user.password())? {
            return Err(UserError::InvalidCredentials);
        }

        let plaintext = Password::new(new_password)?;
        let hashed = self.hash_password(&plaintext)?;
        self.repository.save(user.change_password(hashed)).await?;

        tracing::info!(user_id = %id, "Changed user password");
        Ok(())
    }

    /// Mark a user inactive. Already inactive users are returned unchanged.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: ResourceId) -> UserResult<UserView> {
        let user = self.load(id).await?;
        if !user.is_active() {
            return Ok(user.into());
        }

        let deactivated = self.repository.save(user.deactivate()).await?;
        tracing::info!(user_id = %id, "Deactivated user");
        Ok(deactivated.into())
    }

    async fn load(&self, id: ResourceId) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    // Password helpers

    fn hash_password(&self, plaintext: &Password) -> UserResult<Password> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plaintext.value().as_bytes(), &salt)
            .map(|hash| Password::from_encrypted(hash.to_string()))
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, candidate: &str, stored: &Password) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(stored.value()).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn new_user(password: &str) -> NewUser {
        NewUser {
            email: "ash@pallet.town".to_string(),
            password: password.to_string(),
            first_name: "Ash".to_string(),
            last_name: "Ketchum".to_string(),
            phone_number: None,
            role: Role::Guest,
        }
    }

    #[tokio::test]
    async fn test_register_weak_password_touches_nothing() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().never();
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        let result = service.register(new_user("weak")).await;

        assert!(matches!(result, Err(UserError::InvalidFormat(e)) if e.concept() == "password"));
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));
        mock_repo
            .expect_save()
            .times(1)
            .withf(|user| {
                user.password().is_encrypted()
                    && user.password().value().starts_with("$argon2")
                    && user.password().value() != "Pikachu123!"
            })
            .returning(|user| Ok(user.with_id(ResourceId::new(1))));

        let service = UserService::new(mock_repo);
        let view = service.register(new_user("Pikachu123!")).await.unwrap();
        assert_eq!(view.id, ResourceId::new(1));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_checked_before_save() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|email| {
                Ok(Some(User::create(
                    email,
                    Password::from_encrypted("$argon2id$existing"),
                    "Ash".to_string(),
                    "Ketchum".to_string(),
                    None,
                    Role::Guest,
                )?))
            });
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        let result = service.register(new_user("Pikachu123!")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(email)) if email == "ash@pallet.town"));
    }

    #[tokio::test]
    async fn test_list_users_passes_search_text_untrimmed() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_all()
            .withf(|filter, _| filter.as_ref() == Some(&UserFilter::by_email(" ash ")))
            .times(1)
            .returning(|_, page| Ok(PageResult::from_raw(vec![], 0, page.page, page.size)));
        mock_repo
            .expect_find_all()
            .withf(|filter, _| filter.is_none())
            .times(1)
            .returning(|_, page| Ok(PageResult::from_raw(vec![], 0, page.page, page.size)));

        let service = UserService::new(mock_repo);
        service
            .list_users(Some(" ash "), PageRequest::new(0, 10))
            .await
            .unwrap();
        service
            .list_users(Some("  "), PageRequest::new(0, 10))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found_without_writes() {
        let id = ResourceId::new(9);
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        assert!(matches!(service.get_user(id).await, Err(UserError::NotFound(_))));
        assert!(matches!(service.deactivate(id).await, Err(UserError::NotFound(_))));
        assert!(matches!(
            service.change_password(id, "Pikachu123!", "Raichu456!").await,
            Err(UserError::NotFound(_))
        ));
    }
}
