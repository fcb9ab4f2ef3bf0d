pub mod cookies;

pub use cookies::{CookieJar, CredentialProvider};
