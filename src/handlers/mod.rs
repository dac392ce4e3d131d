// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod health;
mod metrics;
mod root;
mod shared_types;
mod widgets;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_response;
pub use root::root_handler;

// Widget demo handlers
pub use widgets::{add_widget, delete_widget, get_widget, list_widgets, Widget};
