pub mod connectivity;
pub mod delivery;
pub mod message;
pub mod network;
pub mod outcome;

pub use connectivity::Connectivity;
pub use delivery::{
    DeliveryReceipt, DeliveryRequest, DeliveryResult, EndpointDescriptor, EndpointFailure,
};
pub use message::{Message, MessageId};
pub use network::Network;
pub use outcome::Outcome;
