pub mod analytics;
pub mod auth;
pub mod kitchen;
pub mod list;
pub mod order;
pub mod supplier;
pub mod supply;

pub use analytics::*;
pub use auth::*;
pub use kitchen::*;
pub use list::coerce_list;
pub use order::*;
pub use supplier::*;
pub use supply::*;
