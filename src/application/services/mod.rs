pub mod observer;
pub mod retry_policy;
pub mod transport;
