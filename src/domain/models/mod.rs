mod chat_turn;
mod message;
mod segment;
mod session;
mod transcript;

pub use chat_turn::*;
pub use message::*;
pub use segment::*;
pub use session::*;
pub use transcript::*;
