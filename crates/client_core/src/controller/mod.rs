//! Controller layer: UI intents, the submission state machine, and the driver loop.

pub mod events;
pub mod orchestration;
pub mod reducer;
