pub mod settings;

pub use settings::{InspectRequest, PeekSettings, load_settings};
