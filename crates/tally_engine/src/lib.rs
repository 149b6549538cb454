//! Review tally engine: debounce timing, config files, and document decoding.
mod clock;
mod config;
mod decode;
mod engine;
mod scheduler;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load_config, parse_config, render_config, ConfigError, CONFIG_FILE_NAME};
pub use decode::{decode_document, DecodeError, DecodedDocument};
pub use engine::RefreshHandle;
pub use scheduler::RefreshScheduler;
pub use types::RefreshEvent;
