pub mod session;

pub use session::{attach_session, enforce_guard, Session};
