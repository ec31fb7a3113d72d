//! User record model.
//!
//! A [`User`] is the persisted record; [`NewUser`] is a record that has not yet
//! been assigned an identifier; [`UserDraft`] is the caller-supplied intent
//! handed to the service for create and update operations.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of characters in a first or last name.
pub const PERSON_NAME_MAX: usize = 255;
/// Maximum number of characters in an email address.
pub const EMAIL_MAX: usize = 255;

/// Validation errors returned by the value constructors in this module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// A name was empty or whitespace only.
    #[error("name must not be empty")]
    EmptyName,
    /// A name exceeded [`PERSON_NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The email was empty or whitespace only.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The email exceeded [`EMAIL_MAX`] characters.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The email did not match the expected `local@domain` syntax.
    #[error("email is not well formed")]
    InvalidEmail,
}

/// Store-assigned record identifier.
///
/// Identifiers are opaque to callers, never reused and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier issued by a record store.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First or last name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > PERSON_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: PERSON_NAME_MAX,
            });
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Length is enforced separately.
        let pattern = r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address, unique across stored records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{EmailAddress, UserValidationError};
    ///
    /// assert!(EmailAddress::new("ada@example.com").is_ok());
    /// assert_eq!(
    ///     EmailAddress::new("not-an-email"),
    ///     Err(UserValidationError::InvalidEmail)
    /// );
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted user record.
///
/// ## Invariants
/// - `id` was assigned by the store and never changes.
/// - Names and email are validated value types, so never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
        }
    }

    /// Build a [`User`] from raw store columns.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::User;
    ///
    /// let user = User::try_from_parts(1, "Ada", "Lovelace", "ada@example.com")
    ///     .expect("valid user");
    /// assert_eq!(user.email().as_ref(), "ada@example.com");
    /// ```
    pub fn try_from_parts(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id),
            PersonName::new(first_name)?,
            PersonName::new(last_name)?,
            EmailAddress::new(email)?,
        ))
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// First name.
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Last name.
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Replace both names.
    pub fn rename(&mut self, first_name: PersonName, last_name: PersonName) {
        self.first_name = first_name;
        self.last_name = last_name;
    }

    /// Replace the email address.
    pub fn change_email(&mut self, email: EmailAddress) {
        self.email = email;
    }
}

/// User record awaiting its first insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// First name.
    pub first_name: PersonName,
    /// Last name.
    pub last_name: PersonName,
    /// Email address.
    pub email: EmailAddress,
}

impl NewUser {
    /// Attach a store-assigned identifier, producing the persisted record.
    pub fn with_id(self, id: UserId) -> User {
        User::new(id, self.first_name, self.last_name, self.email)
    }
}

/// Caller-supplied fields for create and update.
///
/// `email` is optional: create rejects an absent email, update treats it as
/// "leave unchanged".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// Requested first name.
    pub first_name: PersonName,
    /// Requested last name.
    pub last_name: PersonName,
    /// Requested email, if any.
    pub email: Option<EmailAddress>,
}
