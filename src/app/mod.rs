pub mod context;
pub mod error;
pub mod theme;

pub use context::AppContext;
pub use error::{MirrorError, Result};
pub use theme::{Theme, ThemeContext};
