pub mod confirm_delivery;
pub mod drain_queue;
pub mod list_queued;
pub mod send_message;
