pub mod auth;
pub mod contact;
pub mod filter;
pub mod library;
pub mod newsletter;
pub mod profile;
pub mod session;
