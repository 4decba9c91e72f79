pub mod credential;
pub mod router;
pub mod store;

pub use credential::{Credential, CredentialStore, Role, UserProfile, TOKEN_KEY, USER_KEY};
pub use router::{RoleRouter, RouteState};
pub use store::{FileStore, KeyValueStore, MemoryStore};
