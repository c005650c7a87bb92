pub mod queue;
pub mod state;

pub use queue::{Axis, InputEvent, InputQueue};
pub use state::{Action, InputSource, InputState, KeyBindings};
