//! RPC layer
//!
//! Endpoint descriptors, the JSON-RPC transport, and the two independent
//! client boundaries: the blockchain node and the local key-custody
//! daemon. An outage of one must never block the other, so each client
//! owns its own transport.

pub mod api;
pub mod beekeeper;
pub mod endpoint;
pub mod node;
pub mod transport;

pub use beekeeper::BeekeeperClient;
pub use endpoint::{endpoint_name, Endpoint};
pub use node::NodeClient;
pub use transport::{HttpTransport, Transport};
