//! Local persistence of pagination cursors between runs.
//!
//! The crawler remembers, per container kind, the cursor of the last fully
//! processed page. Cursors are stored as a small JSON document so repeated
//! invocations resume instead of rescanning the repository.

mod cursor_file;
mod cursor_state;
mod error;

pub use cursor_file::{DEFAULT_CURSOR_FILE, JsonFileCursorStore};
#[cfg(any(test, feature = "test-support"))]
pub use cursor_state::MemoryCursorStore;
pub use cursor_state::{CursorState, CursorStore};
pub use error::PersistenceError;
