use std::sync::Arc;

use ruprojectgames_lib::Backend;

pub mod admin_panel;
pub mod guide;
pub mod listing;
pub mod toasts;

/// Backend handle that can be moved into the futures of a [`Task`](iced::Task).
pub type SharedBackend = Arc<dyn Backend>;
