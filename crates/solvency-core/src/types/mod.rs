//! Input model: the borrowing position and the protocol rule governing it.

mod position;
mod protocol;

pub use position::Position;
pub use protocol::ProtocolRule;
