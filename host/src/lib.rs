mod local_host;
mod recording;
mod script;
mod session;
pub use local_host::*;
pub use recording::*;
pub use script::*;
pub use session::*;
