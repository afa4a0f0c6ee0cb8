mod app;
mod auth_state;
mod browser_name;
mod browser_type;
mod platform_signals;
mod profile;

pub use app::*;
pub use auth_state::*;
pub use browser_name::*;
pub use browser_type::*;
pub use platform_signals::*;
pub use profile::*;
