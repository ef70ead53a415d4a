mod contact;
mod media;
mod profile;
mod user;

pub use contact::*;
pub use media::*;
pub use profile::*;
pub use user::*;
