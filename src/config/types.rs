use serde::{Deserialize, Serialize};

use crate::filter::TargetLibraries;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub intros: IntroConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntroConfig {
    /// Comma-separated library names intros are limited to. Empty allows
    /// every movie library.
    #[serde(default)]
    pub included_libraries: String,
}

impl IntroConfig {
    pub fn new(included_libraries: impl Into<String>) -> Self {
        Self {
            included_libraries: included_libraries.into(),
        }
    }

    pub fn target_libraries(&self) -> TargetLibraries {
        TargetLibraries::parse(&self.included_libraries)
    }
}
