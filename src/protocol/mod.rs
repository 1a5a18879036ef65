//! Protocol-level types shared by both endpoint generations
//!
//! Endpoint identifiers, fee quotes, and adapter-params helpers. These are
//! plain data: everything that talks to a chain lives in
//! [`crate::gateway`] and [`crate::contracts`].

mod endpoint_id;
mod fee;
mod options;

pub use endpoint_id::EndpointId;
pub use fee::FeeQuote;
pub use options::{adapter_params_v1, parse_extra_options};
