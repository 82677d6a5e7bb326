// Accounts: plaintext credential list plus the single active session.

pub mod handlers;
pub mod session;
pub mod store;

pub use session::{SessionHolder, SessionState};
pub use store::{AccountError, AccountStore};
