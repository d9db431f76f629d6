//! Local JSON state persisted between invocations

mod selection;
mod session;

pub use selection::Selection;
pub use session::{parse_header, Session};
