//! User data model.
//!
//! A user is created from a validated [`NewUser`] and receives its
//! [`UserId`] from whichever repository stores it. The identifier shape is
//! backend specific: the in-memory store hands out sequential integers while
//! the document store hands out 24-character hexadecimal object ids. Callers
//! must not assume either.

use std::fmt;

use serde::Serialize;

use super::email::{is_valid_email, trim_blank};

/// Validation errors raised while building users from untrusted input.
///
/// The `Display` text of the name and email variants is the exact message
/// returned to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    MissingName,
    InvalidEmail,
    InvalidDocumentId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Name is required."),
            Self::InvalidEmail => write!(f, "A valid email is required."),
            Self::InvalidDocumentId => {
                write!(f, "document id must be 24 hexadecimal characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Number of hexadecimal characters in a document-store identifier.
pub const DOCUMENT_ID_LEN: usize = 24;

/// Opaque identifier generated by the document store.
///
/// Always 24 lowercase hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate and construct a [`DocumentId`]; uppercase hex is normalised.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if raw.len() != DOCUMENT_ID_LEN || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(UserValidationError::InvalidDocumentId);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Backend-assigned user identifier.
///
/// Serialises untagged, so JSON clients see a number for
/// [`UserId::Sequential`] and a string for [`UserId::Document`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum UserId {
    /// Counter-assigned identifier used by the in-memory store.
    Sequential(u64),
    /// Store-generated identifier used by the document store.
    Document(DocumentId),
}

impl UserId {
    /// Interpret a path segment as a sequential identifier.
    ///
    /// Only ASCII digits are accepted: signs, spaces, decimal points and
    /// values that overflow `u64` have no sequential meaning and yield `None`.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::UserId;
    ///
    /// assert_eq!(UserId::parse_sequential("7"), Some(UserId::Sequential(7)));
    /// assert_eq!(UserId::parse_sequential("seven"), None);
    /// ```
    pub fn parse_sequential(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        raw.parse::<u64>().ok().map(Self::Sequential)
    }

    /// Interpret a path segment as a document-store identifier.
    pub fn parse_document(raw: &str) -> Option<Self> {
        DocumentId::new(raw).ok().map(Self::Document)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential(value) => write!(f, "{value}"),
            Self::Document(value) => write!(f, "{value}"),
        }
    }
}

/// Human readable user name; never empty, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Trim and validate a user name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = trim_blank(raw.as_ref());
        if trimmed.is_empty() {
            return Err(UserValidationError::MissingName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a name read back from storage without validating it again.
    pub fn from_stored(stored: String) -> Self {
        Self(stored)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Email address accepted by [`is_valid_email`], stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if !is_valid_email(raw) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trim_blank(raw).to_owned()))
    }

    /// Wrap an address read back from storage without validating it again.
    ///
    /// Records written before a validation change stay readable.
    pub fn from_stored(stored: String) -> Self {
        Self(stored)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Validated request to create a user.
///
/// ## Invariants
/// - the name is checked before the email, so a request failing both
///   reports the missing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: UserName,
    email: EmailAddress,
}

impl NewUser {
    /// Build from already validated components.
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Validate optional text fields; `None` stands for a missing or
    /// non-string value.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::{NewUser, UserValidationError};
    ///
    /// let user = NewUser::try_from_parts(Some(" Alice "), Some("alice@example.com"))
    ///     .expect("valid user");
    /// assert_eq!(user.name().as_ref(), "Alice");
    ///
    /// let err = NewUser::try_from_parts(Some("   "), Some("bad-email")).unwrap_err();
    /// assert_eq!(err, UserValidationError::MissingName);
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let name = UserName::new(name.ok_or(UserValidationError::MissingName)?)?;
        let email = EmailAddress::new(email.ok_or(UserValidationError::InvalidEmail)?)?;
        Ok(Self::new(name, email))
    }

    /// Requested user name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Attach a backend-assigned identifier, producing the stored [`User`].
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name, self.email)
    }
}

/// Application user as returned to clients: `{ "id", "name", "email" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, name: UserName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Backend-assigned identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// User name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
