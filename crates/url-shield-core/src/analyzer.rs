//! Analyzer trait
//!
//! Common shape for every sub-engine of the analysis pipeline. Engines are
//! pure synchronous functions of their input: no I/O, no interior state,
//! no suspension points. The ensemble calls them directly so each keeps
//! its own typed output; the trait exists for the uniform identification
//! surface and for testing engines behind a common harness.

/// A pure analysis engine
///
/// ## Example
///
/// ```rust,ignore
/// use url_shield_core::Analyzer;
///
/// struct TldScorer;
///
/// impl Analyzer for TldScorer {
///     type Input = str;
///     type Output = TldResult;
///
///     fn name(&self) -> &'static str {
///         "tld_scorer"
///     }
///
///     fn analyze(&self, host: &str) -> TldResult {
///         // classify the trailing label
///     }
/// }
/// ```
pub trait Analyzer {
    /// Input the engine consumes (typically a parsed URL or host string)
    type Input: ?Sized;

    /// Engine-specific result type
    type Output;

    /// Engine name for identification and tracing
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str {
        "No description provided"
    }

    /// Run the engine. Must be deterministic for a given input.
    fn analyze(&self, input: &Self::Input) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LengthAnalyzer;

    impl Analyzer for LengthAnalyzer {
        type Input = str;
        type Output = usize;

        fn name(&self) -> &'static str {
            "length"
        }

        fn analyze(&self, input: &str) -> usize {
            input.len()
        }
    }

    #[test]
    fn test_analyzer_trait_object_free_dispatch() {
        let engine = LengthAnalyzer;
        assert_eq!(engine.name(), "length");
        assert_eq!(engine.analyze("abcd"), 4);
        assert_eq!(engine.description(), "No description provided");
    }
}
