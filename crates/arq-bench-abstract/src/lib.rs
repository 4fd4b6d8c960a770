pub mod config;
pub mod trial;

pub use config::{HarnessConfig, HarnessConfigOverride, MalformedPolicy};
pub use trial::{Method, Role, TrialConfiguration, TrialResult};
