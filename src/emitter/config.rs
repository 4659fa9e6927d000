//! Emission configuration
//!
//! Layout settings for generated Ruby source, plus whether primitive literals may be copied from their source.

/// Emission configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Replay a primitive literal's original source text when it has a location
    pub trust_source_locations: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            trust_source_locations: true,
        }
    }
}

impl EmitConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Config that always writes canonical literal forms, ignoring locations
    pub fn canonical() -> Self {
        Self::default().with_trust_source_locations(false)
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set whether primitive literals replay their source text
    pub fn with_trust_source_locations(mut self, trust: bool) -> Self {
        self.trust_source_locations = trust;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Defaults
    // ========================================

    #[test]
    fn test_default_config() {
        let config = EmitConfig::default();
        assert_eq!(config.indent_width, 2);
        assert!(config.trust_source_locations);
        assert_eq!(EmitConfig::new(), config);
    }

    #[test]
    fn test_canonical_config() {
        let config = EmitConfig::canonical();
        assert!(!config.trust_source_locations);
        assert_eq!(config.indent_width, 2);
    }

    // ========================================
    // Builder
    // ========================================

    #[test]
    fn test_builder_chain() {
        let config = EmitConfig::new()
            .with_indent_width(4)
            .with_trust_source_locations(false);
        assert_eq!(config.indent_width, 4);
        assert!(!config.trust_source_locations);
    }
}
