//! Shared terminal utilities

mod progress;
mod styling;

pub use progress::create_spinner;
pub use styling::{print_banner, print_error, print_hint, print_info, print_warning};
