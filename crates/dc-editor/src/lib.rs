pub mod input;
pub mod modify;
pub mod session;
pub mod tools;

pub use input::InputEvent;
pub use modify::modify;
pub use session::Session;
pub use tools::{AttachTool, Gesture};
