//! Session domain module.
//!
//! # Module Structure
//!
//! - `state`: the login state machine (`SessionState`)
//! - `event`: transitions published to subscribers (`SessionEvent`)
//! - `storage`: durable key/value storage trait and the in-memory store
//! - `store`: the process-scoped `SessionStore`

mod event;
mod state;
mod storage;
mod store;

pub use event::SessionEvent;
pub use state::{AuthSession, SessionPhase, SessionState};
pub use storage::{MemorySessionStorage, SessionStorage, TOKEN_KEY, USER_KEY};
pub use store::SessionStore;
