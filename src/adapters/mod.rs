//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports module.
//! Adapters depend on domain ports, not the other way around.

pub mod msgpack_store;

pub use msgpack_store::MsgPackStore;
