//! Contract bindings for the two observed OFT ABI variants
//!
//! The ABI set is fixed and versioned: the workflow treats it as an
//! externally-imposed capability set, probed once per contract load.

pub mod oft_v1;
pub mod oft_v2;

pub use oft_v1::OftV1Contract;
pub use oft_v2::{MessagingFee, OftV2Contract, SendParam};
