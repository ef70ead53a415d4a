use crate::client::NewsletterStore;
use rand::seq::SliceRandom;

/// Friendly copy shown on a fresh subscription, picked at random.
pub const SUCCESS_MESSAGES: [&str; 3] = [
    "Welcome aboard the creative journey! 🎉 Thank you for joining us.",
    "You’re now part of our vibrant community! 🌟 Thanks for subscribing.",
    "Thrilled to have you with us! 🚀 Your subscription is confirmed.",
];

/// Copy for addresses that are already on the list.
pub const EXISTING_MESSAGES: [&str; 3] = [
    "You’re already a cherished member of our creative family! 😊 No need to subscribe again.",
    "Looks like you’re already in the loop! 🎨 Stay tuned for more.",
    "We’ve got you covered! 🙌 You’re already subscribed—enjoy the ride!",
];

/// Generic failure copy. Backend details are logged, never shown.
pub const FAILURE_MESSAGES: [&str; 3] = [
    "Oops! Something went awry. Please try again or reach out to our team. 😔",
    "It seems we hit a snag. Let’s give it another go! 🙏",
    "A little hiccup occurred. Please check your email and try again. 🌱",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NewsletterError {
    #[error("{0}")]
    AlreadySubscribed(String),
    #[error("It seems our security settings need a tweak. Please contact support.")]
    SecurityPolicy,
    #[error("{0}")]
    Failed(String),
}

/// Adds an address to the mailing list, returning the success copy to show.
/// An existing subscription is reported as such whether it is found by the
/// duplicate probe or by the insert racing another subscriber (code 23505);
/// a row security rejection (code 42501) gets its own message.
pub async fn subscribe(
    store: &dyn NewsletterStore,
    email: &str,
) -> Result<String, NewsletterError> {
    let existing = match store.find_subscriber(email).await {
        Ok(existing) => existing,
        Err(error) => {
            tracing::warn!(error = %error, "newsletter duplicate probe failed");
            return Err(NewsletterError::Failed(pick(&FAILURE_MESSAGES)));
        }
    };
    if existing.is_some() {
        return Err(NewsletterError::AlreadySubscribed(pick(&EXISTING_MESSAGES)));
    }

    match store.insert_subscriber(email).await {
        Ok(()) => Ok(pick(&SUCCESS_MESSAGES)),
        Err(error) => match error.code() {
            Some("42501") => Err(NewsletterError::SecurityPolicy),
            Some("23505") => Err(NewsletterError::AlreadySubscribed(pick(&EXISTING_MESSAGES))),
            _ => {
                tracing::warn!(error = %error, "newsletter insert failed");
                Err(NewsletterError::Failed(pick(&FAILURE_MESSAGES)))
            }
        },
    }
}

fn pick(messages: &[&str]) -> String {
    let mut rng = rand::thread_rng();
    messages
        .choose(&mut rng)
        .copied()
        .unwrap_or(messages[0])
        .to_string()
}
