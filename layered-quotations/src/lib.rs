#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Direct speech for layered-coref.
//!
//! Quotations are found by a single scan over the document's tokens. Each
//! token gets a B/I/O label; each quotation may receive a speaker and an
//! addressee mention, which in turn rule out some coreference links.
//!
//! ## Usage
//!
//! ```ignore
//! use layered_quotations::{apply_quotation_constraints, QuotationScanner, SpeakerAttribution};
//!
//! let mut scan = QuotationScanner::new().scan(&doc);
//! SpeakerAttribution::new(&config).attribute(&doc, &mentions, &mut scan);
//! apply_quotation_constraints(&scan.quotations, &mut mentions);
//! ```
//!
//! Delimiters are straight and curly single/double quotes, backticks and
//! guillemets. A dash at the start of a paragraph opens a dialogue turn that
//! ends with the reporting clause ("- Kom binnen, zei ze.") or, without
//! one, with the paragraph.

mod constraints;
mod quotation;
mod scanner;
mod speaker;

pub use constraints::apply_quotation_constraints;
pub use quotation::{QuoteLabel, QuoteLabels, Quotation};
pub use scanner::{QuoteScan, QuotationScanner};
pub use speaker::{is_speaker, SpeakerAttribution};

#[cfg(test)]
mod tests {
    mod attribution;
    mod scanning;
}
