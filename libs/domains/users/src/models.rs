use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use value_objects::{Email, Password, PhoneNumber, ResourceId};

use crate::error::{UserError, UserResult};

const NAME_MAX_LENGTH: usize = 100;

/// User roles
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Role {
    #[default]
    Guest,
    Staff,
    Admin,
}

/// User aggregate.
///
/// Fields are private so every instance went through [`User::create`] or
/// [`User::rehydrate`]. Transitions return a new value and leave `self`
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: ResourceId,
    email: Email,
    password: Password,
    first_name: String,
    last_name: String,
    phone_number: Option<PhoneNumber>,
    role: Role,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Storage shape of a user. Rehydrating validates everything except the
/// already-encrypted password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response DTO (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: ResourceId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<PhoneNumber>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for registering a new user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// DTO for changing profile fields. `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// By-example filter over users.
///
/// `email`, `first_name` and `last_name` match by case-insensitive substring;
/// `role` and `is_active` match exactly. `None` is a wildcard. The identifier,
/// password and timestamps are never filtered on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserFilter {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    pub fn by_email(text: impl Into<String>) -> Self {
        Self {
            email: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        contains(self.email.as_deref(), user.email.value())
            && contains(self.first_name.as_deref(), &user.first_name)
            && contains(self.last_name.as_deref(), &user.last_name)
            && self.role.is_none_or(|role| role == user.role)
            && self.is_active.is_none_or(|active| active == user.is_active)
    }
}

fn contains(needle: Option<&str>, haystack: &str) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

fn checked_name(field: &str, value: String) -> UserResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserError::Validation(format!("{field} must not be blank")));
    }
    if trimmed.chars().count() > NAME_MAX_LENGTH {
        return Err(UserError::Validation(format!(
            "{field} cannot exceed {NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn checked_phone(phone: Option<String>) -> UserResult<Option<PhoneNumber>> {
    Ok(phone.map(PhoneNumber::new).transpose()?)
}

impl User {
    /// Build a new, unsaved, active user
    pub fn create(
        email: &str,
        password: Password,
        first_name: String,
        last_name: String,
        phone_number: Option<String>,
        role: Role,
    ) -> UserResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: ResourceId::generate(),
            email: Email::new(email)?,
            password,
            first_name: checked_name("first_name", first_name)?,
            last_name: checked_name("last_name", last_name)?,
            phone_number: checked_phone(phone_number)?,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a user read back from storage
    pub fn rehydrate(record: UserRecord) -> UserResult<Self> {
        Ok(Self {
            id: ResourceId::new(record.id),
            email: Email::new(record.email)?,
            password: Password::from_encrypted(record.password_hash),
            first_name: checked_name("first_name", record.first_name)?,
            last_name: checked_name("last_name", record.last_name)?,
            phone_number: checked_phone(record.phone_number)?,
            role: record.role,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id.value(),
            email: self.email.value().to_string(),
            password_hash: self.password.value().to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.as_ref().map(|p| p.value().to_string()),
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Copy with the given profile fields replaced
    pub fn update_profile(&self, update: ProfileUpdate) -> UserResult<Self> {
        let first_name = match update.first_name {
            Some(name) => checked_name("first_name", name)?,
            None => self.first_name.clone(),
        };
        let last_name = match update.last_name {
            Some(name) => checked_name("last_name", name)?,
            None => self.last_name.clone(),
        };
        let phone_number = match checked_phone(update.phone_number)? {
            Some(phone) => Some(phone),
            None => self.phone_number.clone(),
        };

        Ok(Self {
            first_name,
            last_name,
            phone_number,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    /// Copy with a new password
    pub fn change_password(&self, password: Password) -> Self {
        Self {
            password,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Copy marked inactive
    pub fn deactivate(&self) -> Self {
        Self {
            is_active: false,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Copy carrying a storage-assigned identifier
    pub fn with_id(&self, id: ResourceId) -> Self {
        Self { id, ..self.clone() }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }

    pub fn is_guest(&self) -> bool {
        self.role == Role::Guest
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
