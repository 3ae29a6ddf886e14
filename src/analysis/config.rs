//! Analysis configuration.

/// Default name of the time variable.
pub const DEFAULT_TIME_VARIABLE: &str = "t";

/// Default prefix for anonymous unknowns.
pub const DEFAULT_ANONYMOUS_PREFIX: &str = "_x";

/// Configuration for one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Name of the independent time variable in component expressions.
    pub time_variable: String,
    /// Prefix used when minting anonymous unknowns.
    pub anonymous_prefix: String,
    /// Fail when the finished system has a different number of equations
    /// and unknowns. When false the mismatch is only logged.
    pub strict: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            time_variable: DEFAULT_TIME_VARIABLE.to_string(),
            anonymous_prefix: DEFAULT_ANONYMOUS_PREFIX.to_string(),
            strict: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of the time variable.
    pub fn with_time_variable(mut self, name: impl Into<String>) -> Self {
        self.time_variable = name.into();
        self
    }

    /// Set the prefix for anonymous unknowns.
    pub fn with_anonymous_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.anonymous_prefix = prefix.into();
        self
    }

    /// Choose whether an ill-posed system is an error.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
