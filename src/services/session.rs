//! Session shell: owns the `logged_in` / `admin` flag pair everything else
//! reads. The flags are recomputed from the backend on bootstrap and on auth
//! events, then pushed to observers; nothing polls them.

use crate::client::{AuthClient, ProfileStore};
use crate::models::{AuthEvent, SessionFlags};
use std::sync::Arc;
use tracing::warn;

type Observer = Box<dyn Fn(SessionFlags) + Send + Sync>;

pub struct Session {
    auth: Arc<dyn AuthClient>,
    profiles: Arc<dyn ProfileStore>,
    flags: SessionFlags,
    observers: Vec<Observer>,
}

impl Session {
    pub fn new(auth: Arc<dyn AuthClient>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            auth,
            profiles,
            flags: SessionFlags::default(),
            observers: Vec::new(),
        }
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// Registers a callback invoked with the new flags after every
    /// recomputation, including ones that land on the same values.
    pub fn observe(&mut self, observer: impl Fn(SessionFlags) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Establishes the flags at startup from whatever session the backend
    /// still holds. Failures degrade rather than propagate: an unreadable
    /// profile leaves the user signed in but never grants admin.
    pub async fn bootstrap(&mut self) -> SessionFlags {
        let flags = self.compute().await;
        self.set_flags(flags);
        flags
    }

    /// Applies an auth state transition pushed by the backend.
    pub async fn handle(&mut self, event: AuthEvent) -> SessionFlags {
        match event {
            AuthEvent::SignedIn => self.bootstrap().await,
            AuthEvent::SignedOut => {
                self.set_flags(SessionFlags::default());
                self.flags
            }
        }
    }

    async fn compute(&self) -> SessionFlags {
        let user = match self.auth.current_user().await {
            Ok(user) => user,
            Err(error) => {
                warn!(error = %error, "could not read auth session, treating as signed out");
                None
            }
        };
        let Some(user) = user else {
            return SessionFlags::default();
        };
        let admin = match self.profiles.fetch_profile(user.id).await {
            Ok(Some(profile)) => profile.is_admin,
            Ok(None) => false,
            Err(error) => {
                warn!(user = %user.id, error = %error, "could not read profile, withholding admin");
                false
            }
        };
        SessionFlags {
            logged_in: true,
            admin,
        }
    }

    fn set_flags(&mut self, flags: SessionFlags) {
        self.flags = flags;
        for observer in &self.observers {
            observer(flags);
        }
    }
}
