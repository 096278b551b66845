#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Sieve clustering for layered-coref.
//!
//! Mentions start out in clusters of their own. A fixed cascade of sieves,
//! ordered from most to least precise, then merges clusters; every sieve
//! sees the merges made before it. The cascade:
//!
//! 1. exact and relaxed string match
//! 2. precise syntactic constructs (apposition, predicate nominal,
//!    relative/reflexive/reciprocal pronoun, acronym)
//! 3. strict head match at three strictness levels
//! 4. proper-name head match, exact and relaxed
//! 5. pronoun resolution, including quoted "ik" and "jij"
//!
//! ## Usage
//!
//! ```ignore
//! use layered_coref::{CorefConfig, Lexicon, PleonasticRules};
//! use layered_sieves::CorefResolver;
//!
//! let lexicon = Lexicon::new();
//! let resolution = CorefResolver::new(&lexicon, &PleonasticRules, CorefConfig::default())
//!     .resolve(&doc)?;
//! for (antecedent, mention, sieve) in resolution.links() {
//!     println!("{} <- {} ({})", antecedent, mention, sieve);
//! }
//! if let Some(display) = resolution.sentence_display(&doc, 0) {
//!     println!("{}", display);
//! }
//! ```
//!
//! This crate defines:
//! - [`Clusters`] and [`CorefState`], the partition the sieves work on
//! - [`Sieve`] and one type per sieve
//! - [`SievePipeline`] and [`CorefResolver`]
//! - [`Resolution`], the final mentions, clusters and quotations

mod clusters;
mod head_match;
mod pipeline;
mod postprocess;
mod precise;
mod pronouns;
mod resolution;
mod sieve;
mod state;
mod string_match;

pub use clusters::Clusters;
pub use head_match::{ProperHeadMatch, StrictHeadMatch, Strictness};
pub use pipeline::{CorefResolver, SieveKind, SievePipeline};
pub use postprocess::apply_exclusions;
pub use precise::PreciseConstructs;
pub use pronouns::PronounResolution;
pub use resolution::{Resolution, TokenAnnotation};
pub use sieve::{Sieve, SieveContext};
pub use state::CorefState;
pub use string_match::StringMatch;

#[cfg(test)]
mod tests {
    mod clustering;
    mod fixtures;
    mod properties;
    mod resolver;
    mod sieves;
}
