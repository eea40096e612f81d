mod call_command;
mod pairing;
mod registry;
mod switchboard;

pub use call_command::*;
pub use pairing::*;
pub use registry::*;
pub use switchboard::*;
