pub mod app;
pub mod constants;
pub mod error;
pub mod host_event;

mod run;

pub use crate::constants::WINDOW_CLASS_NAME;
pub use app::App;
pub use error::{AppError, AppResult};
pub use host_event::HostEvent;
pub use run::run;
