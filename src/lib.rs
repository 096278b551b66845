#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Shared foundation for sieve-based coreference resolution.
//!
//! This crate holds everything the resolution stages agree on:
//!
//! - **Parse trees**: [`ParseTree`], a read-only arena over Alpino-style
//!   dependency-annotated constituency trees, queried through [`NodeRef`]
//!   and built in tests with [`TreeBuilder`]
//! - **Documents**: [`Document`], ordered sentences with paragraph numbers and
//!   a global token index
//! - **Features**: [`Features`], number/gender/animacy/person agreement with
//!   the merge and compatibility rules of the sieves
//! - **Resources**: the [`FeatureLexicon`] and [`PleonasticOracle`] seams
//!   plus in-memory and rule-based implementations
//! - **Configuration and errors**: [`CorefConfig`], [`CorefError`]
//!
//! The stages themselves live in plugin crates:
//! `layered-mentions` (mention extraction), `layered-quotations` (quotation
//! detection and speaker attribution) and `layered-sieves` (clustering).
//!
//! ## Usage
//!
//! ```ignore
//! use layered_coref::{load_document, CorefConfig, Lexicon, PleonasticRules};
//! use layered_sieves::CorefResolver;
//!
//! let doc = load_document(Path::new("parses/"))?;
//! let lexicon = Lexicon::new();
//! let resolver = CorefResolver::new(&lexicon, &PleonasticRules, CorefConfig::default());
//! let resolution = resolver.resolve(&doc)?;
//! for (representative, members) in resolution.clusters() {
//!     println!("{:?}: {:?}", representative, members);
//! }
//! ```

mod config;
mod display;
mod document;
mod error;
mod features;
pub mod lexicon;
mod loader;
mod pleonastic;
mod resources;
mod tree;

pub use config::{CorefConfig, Exclusion};
pub use display::{DisplayLink, LinkTarget, SpanDisplay, TokenRange};
pub use document::{DocPosition, Document, Sentence, SentenceId};
pub use error::{CorefError, CorefResult};
pub use features::{FeatureHint, Features, Gender, Number, Person};
pub use loader::{load_document, load_tree, parse_sentence_id};
pub use pleonastic::{NeverPleonastic, PleonasticOracle, PleonasticRules};
pub use resources::{Animacy, FeatureLexicon, GenderCounts, Lexicon, NounEntry};
pub use tree::{Descendants, Node, NodeId, NodeRef, ParseTree, TreeBuilder};
