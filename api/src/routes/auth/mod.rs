//! Auth routes: explicit refresh for API clients, logout, and the
//! session listing.

mod logout;
mod refresh;
mod sessions;

pub use logout::logout;
pub use refresh::refresh_token;
pub use sessions::sessions;
