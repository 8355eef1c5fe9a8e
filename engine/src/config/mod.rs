pub mod settings;

pub use settings::{DataSettings, EngineSettings};
