//! deskcalc-core - UI-agnostic calculator session + settings storage.

pub mod error;
pub mod session;
pub mod settings;

pub use error::{DeskcalcError, Result};
pub use session::Session;
pub use settings::{Settings, Theme};

pub use deskcalc_engine::engine::{DisplayStyle, FormattedOutput, Key, Snapshot};
