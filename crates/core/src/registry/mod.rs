//! Administrative registries: weekly slots and extra events

pub mod extras;
pub mod slots;

pub use extras::{ExtraEventEditor, NewExtra};
pub use slots::{SlotRegistry, SlotUpdate};
