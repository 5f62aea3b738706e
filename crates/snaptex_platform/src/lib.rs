pub mod events;
pub mod host;
pub mod platform_api;

pub use events::*;
pub use host::*;
pub use platform_api::*;
