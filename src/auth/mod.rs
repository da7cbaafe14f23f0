//! Authentication: credential checks, session binding, the access gate

pub mod authenticator;
pub mod binder;
pub mod gate;
pub mod middleware;
pub mod password;

pub use authenticator::{AuthFailure, Authenticator, Identity, RegistrationError};
pub use binder::SessionBinder;
pub use gate::{check, Access, PageCount, DENIED_MESSAGE};
pub use middleware::CurrentUser;
