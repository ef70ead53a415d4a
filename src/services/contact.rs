use crate::client::{ContactStore, RemoteError};
use crate::models::ContactMessage;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid email regex pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Full name is required")]
    MissingFullName,
    #[error("Company name is required")]
    MissingCompanyName,
    #[error("A valid email is required")]
    InvalidEmail,
    #[error("{0}")]
    Remote(RemoteError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Submitted,
    /// The address already sent an enquiry; nothing new is stored and the
    /// caller reassures rather than errors.
    AlreadyExists,
}

/// All field problems at once, in form order, so a caller can mark every
/// offending field rather than only the first.
pub fn validate(message: &ContactMessage) -> Vec<ContactError> {
    let mut errors = Vec::new();
    if message.full_name.trim().is_empty() {
        errors.push(ContactError::MissingFullName);
    }
    if message.company_name.trim().is_empty() {
        errors.push(ContactError::MissingCompanyName);
    }
    if message.email.trim().is_empty() || !EMAIL_REGEX.is_match(&message.email) {
        errors.push(ContactError::InvalidEmail);
    }
    errors
}

/// Validates and stores an enquiry. Submission is blocked while any field
/// error remains; a repeat email becomes [`ContactOutcome::AlreadyExists`]
/// without touching the table again.
pub async fn submit(
    store: &dyn ContactStore,
    message: ContactMessage,
) -> Result<ContactOutcome, ContactError> {
    if let Some(error) = validate(&message).into_iter().next() {
        return Err(error);
    }

    let existing = store
        .find_contact(&message.email)
        .await
        .map_err(ContactError::Remote)?;
    if existing.is_some() {
        return Ok(ContactOutcome::AlreadyExists);
    }

    store
        .insert_contact(message)
        .await
        .map_err(ContactError::Remote)?;
    Ok(ContactOutcome::Submitted)
}
