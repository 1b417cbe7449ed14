//! NBT and Anvil (`.mca`) region codec built around an editable in-memory tag tree,
//! rather than a `serde` mapping onto caller-defined structs.

mod compression;
mod messages;
mod mutf8;
mod progress;
mod reader;
mod writer;

pub mod decode;
pub mod encode;
pub mod error;
pub mod kind;
pub mod mca;
pub mod tree;

pub use compression::Format;
pub use decode::{decode, decode_with, Decoded};
pub use encode::{encode, encode_with};
pub use error::{Error, Result};
pub use kind::Kind;
pub use mca::Region;
pub use messages::Messages;
pub use progress::{CancellationToken, Progress};
pub use tree::{NodeId, Tree};
