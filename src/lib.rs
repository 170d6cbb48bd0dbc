pub mod config;
pub mod error;
pub mod model;
pub mod updater;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{Dialect, Package};
pub use updater::{FileUpdate, FileUpdater, UpdateOptions, Updater};
