#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Mention extraction for layered-coref.
//!
//! A mention is a token span in one sentence that may refer to an entity:
//! a name, a common noun phrase or a pronoun. Extraction walks each parse
//! tree, trims candidate spans (relative clauses, appositions, edge
//! punctuation), rejects non-referring material and detects agreement
//! features from the head word and the feature lexicon.
//!
//! ## Usage
//!
//! ```ignore
//! use layered_coref::{Lexicon, PleonasticRules};
//! use layered_mentions::MentionExtractor;
//!
//! let lexicon = Lexicon::new();
//! let mentions = MentionExtractor::new(&lexicon, &PleonasticRules).extract(&doc)?;
//! for mention in &mentions {
//!     println!("{}", mention);
//! }
//! ```
//!
//! This crate defines:
//! - [`Mention`], [`MentionId`], [`MentionType`]
//! - [`MentionExtractor`], the rule-based extractor
//! - [`head_index`], syntactic head finding shared with the sieves

mod detect;
mod extractor;
mod head;
mod mention;

pub use detect::detect_features;
pub use extractor::MentionExtractor;
pub use head::{head_index, head_word};
pub use mention::{Mention, MentionId, MentionSpan, MentionType};

#[cfg(test)]
mod tests {
    mod extraction;
    mod features;
}
