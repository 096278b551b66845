//! Lexical resources for feature detection.
//!
//! The extractor consumes the [`FeatureLexicon`] trait; [`Lexicon`] is an
//! in-memory implementation filled from plain-text tables:
//!
//! - noun table: `lemma<TAB>gender<TAB>animacy`
//! - first names: `;`-separated, two header lines, female name in the second
//!   column and male name in the fourth
//! - phrase counts: `phrase<TAB>masc fem neut plural`

use crate::{CorefError, CorefResult, FeatureHint, Gender, Number};
use std::collections::HashMap;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animacy {
    Human,
    NonHuman,
}

/// Gender and animacy of a common noun or first name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounEntry {
    pub gender: Option<Gender>,
    pub animacy: Animacy,
}

/// Read-only lookup shared by all documents.
pub trait FeatureLexicon: Send + Sync {
    /// Entry for a lemma with compound separators (`_`) already removed.
    fn noun(&self, lemma: &str) -> Option<NounEntry>;

    /// Features for a full phrase or a single name token.
    fn phrase(&self, phrase: &str) -> Option<FeatureHint>;
}

/// Corpus counts of a phrase being referred to by each pronoun class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderCounts {
    pub masculine: u32,
    pub feminine: u32,
    pub neuter: u32,
    pub plural: u32,
}

impl GenderCounts {
    /// A class counts when it accounts for more than a third of the total.
    pub fn hint(&self) -> Option<FeatureHint> {
        let total = self.masculine + self.feminine + self.neuter + self.plural;
        let strong = |count: u32| 3 * count > total;
        let singular = |gender, human| FeatureHint {
            number: Some(Number::Singular),
            gender: Some(gender),
            human,
        };

        if strong(self.masculine) && strong(self.feminine) {
            Some(singular(Gender::FemMasc, Some(true)))
        } else if strong(self.masculine) {
            Some(singular(Gender::Masculine, Some(true)))
        } else if strong(self.feminine) {
            Some(singular(Gender::Feminine, Some(true)))
        } else if strong(self.neuter) {
            Some(singular(Gender::Neuter, Some(false)))
        } else if strong(self.plural) {
            Some(FeatureHint {
                number: Some(Number::Plural),
                gender: Some(Gender::Neuter),
                human: None,
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    nouns: HashMap<String, NounEntry>,
    phrases: HashMap<String, GenderCounts>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_noun(&mut self, lemma: impl Into<String>, entry: NounEntry) {
        self.nouns.insert(lemma.into(), entry);
    }

    pub fn insert_phrase(&mut self, phrase: &str, counts: GenderCounts) {
        self.phrases.insert(phrase.to_lowercase(), counts);
    }

    pub fn with_noun(mut self, lemma: &str, gender: Option<Gender>, animacy: Animacy) -> Self {
        self.insert_noun(lemma, NounEntry { gender, animacy });
        self
    }

    pub fn with_phrase(mut self, phrase: &str, counts: GenderCounts) -> Self {
        self.insert_phrase(phrase, counts);
        self
    }

    /// Read the noun table. Empty lines are skipped.
    pub fn read_nouns(&mut self, reader: impl BufRead) -> CorefResult<()> {
        for (n, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| resource_error(n, e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 {
                return Err(resource_error(n, "expected lemma, gender and animacy".into()));
            }
            let animacy = if fields[2] == "human" {
                Animacy::Human
            } else {
                Animacy::NonHuman
            };
            self.insert_noun(
                fields[0],
                NounEntry {
                    gender: Gender::from_code(fields[1]),
                    animacy,
                },
            );
        }
        Ok(())
    }

    /// Read the first-name list, storing every name as a human noun.
    pub fn read_first_names(&mut self, reader: impl BufRead) -> CorefResult<()> {
        for (n, line) in reader.lines().enumerate().skip(2) {
            let line = line.map_err(|e| resource_error(n, e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(';').collect();
            if fields.len() < 4 {
                return Err(resource_error(n, "expected at least four columns".into()));
            }
            for (name, gender) in [(fields[1], Gender::Feminine), (fields[3], Gender::Masculine)] {
                let name = name.trim();
                if !name.is_empty() {
                    self.insert_noun(
                        name,
                        NounEntry {
                            gender: Some(gender),
                            animacy: Animacy::Human,
                        },
                    );
                }
            }
        }
        Ok(())
    }

    /// Read the phrase count table.
    pub fn read_phrase_counts(&mut self, reader: impl BufRead) -> CorefResult<()> {
        for (n, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| resource_error(n, e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let (phrase, counts) = line
                .split_once('\t')
                .ok_or_else(|| resource_error(n, "missing tab separator".into()))?;
            let counts: Vec<u32> = counts
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|e: std::num::ParseIntError| resource_error(n, e.to_string()))?;
            if counts.len() != 4 {
                return Err(resource_error(n, "expected four counts".into()));
            }
            self.insert_phrase(
                phrase,
                GenderCounts {
                    masculine: counts[0],
                    feminine: counts[1],
                    neuter: counts[2],
                    plural: counts[3],
                },
            );
        }
        Ok(())
    }
}

fn resource_error(line_idx: usize, message: String) -> CorefError {
    CorefError::Resource {
        line: line_idx + 1,
        message,
    }
}

impl FeatureLexicon for Lexicon {
    fn noun(&self, lemma: &str) -> Option<NounEntry> {
        self.nouns.get(lemma).copied()
    }

    fn phrase(&self, phrase: &str) -> Option<FeatureHint> {
        if phrase.is_empty() {
            return None;
        }
        self.phrases.get(&phrase.to_lowercase())?.hint()
    }
}
