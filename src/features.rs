//! Agreement features: number, gender, animacy and person.
//!
//! Every field is optional; `None` means unknown. Merging two records and
//! testing them for compatibility follow the reconciliation rules used by
//! the clustering sieves.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Number {
    Singular,
    Plural,
    /// Underspecified: compatible with either.
    Both,
}

impl Number {
    /// Parse Alpino `num`/`rnum` values.
    pub fn from_num(value: &str) -> Option<Self> {
        match value {
            "sg" => Some(Number::Singular),
            "pl" => Some(Number::Plural),
            "both" => Some(Number::Both),
            _ => None,
        }
    }

    /// Parse Alpino `getal` values.
    pub fn from_getal(value: &str) -> Option<Self> {
        match value {
            "ev" => Some(Number::Singular),
            "mv" => Some(Number::Plural),
            "getal" => Some(Number::Both),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Number::Singular => "sg",
            Number::Plural => "pl",
            Number::Both => "both",
        })
    }
}

const MASC: u8 = 0b001;
const FEM: u8 = 0b010;
const NEUT: u8 = 0b100;

/// Grammatical gender as a non-empty subset of {m, f, n} of size one or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
    FemMasc,
    NeuterMasc,
    FemNeuter,
}

impl Gender {
    fn bits(self) -> u8 {
        match self {
            Gender::Masculine => MASC,
            Gender::Feminine => FEM,
            Gender::Neuter => NEUT,
            Gender::FemMasc => FEM | MASC,
            Gender::NeuterMasc => NEUT | MASC,
            Gender::FemNeuter => FEM | NEUT,
        }
    }

    fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            MASC => Some(Gender::Masculine),
            FEM => Some(Gender::Feminine),
            NEUT => Some(Gender::Neuter),
            b if b == FEM | MASC => Some(Gender::FemMasc),
            b if b == NEUT | MASC => Some(Gender::NeuterMasc),
            b if b == FEM | NEUT => Some(Gender::FemNeuter),
            _ => None,
        }
    }

    /// Parse a letter code such as `m`, `fm` or `nm` (letter order is free).
    pub fn from_code(code: &str) -> Option<Self> {
        let mut bits = 0;
        for ch in code.chars() {
            bits |= match ch {
                'm' => MASC,
                'f' => FEM,
                'n' => NEUT,
                _ => return None,
            };
        }
        Self::from_bits(bits)
    }

    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// Whether every gender in `other` is also in `self`.
    pub fn contains(self, other: Gender) -> bool {
        self.bits() & other.bits() == other.bits()
    }

    pub fn overlaps(self, other: Gender) -> bool {
        self.bits() & other.bits() != 0
    }

    /// Reconcile two genders: the more specific one when one contains the
    /// other, the two-letter union of two distinct single genders, else
    /// unknown.
    pub fn reconcile(self, other: Gender) -> Option<Gender> {
        if self.contains(other) {
            Some(other)
        } else if other.contains(self) {
            Some(self)
        } else if self.is_single() && other.is_single() {
            Self::from_bits(self.bits() | other.bits())
        } else {
            None
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Masculine => "m",
            Gender::Feminine => "f",
            Gender::Neuter => "n",
            Gender::FemMasc => "fm",
            Gender::NeuterMasc => "nm",
            Gender::FemNeuter => "fn",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Person {
    First,
    Second,
    Third,
}

impl Person {
    /// Parse the leading digit of an Alpino `persoon` value (`1`, `2v`, `3p`...).
    pub fn from_persoon(value: &str) -> Option<Self> {
        match value.chars().next() {
            Some('1') => Some(Person::First),
            Some('2') => Some(Person::Second),
            Some('3') => Some(Person::Third),
            _ => None,
        }
    }

    /// First or second person: a discourse participant.
    pub fn is_participant(self) -> bool {
        matches!(self, Person::First | Person::Second)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Person::First => "1",
            Person::Second => "2",
            Person::Third => "3",
        })
    }
}

/// Partial feature record from a lexical resource, applied field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureHint {
    pub number: Option<Number>,
    pub gender: Option<Gender>,
    pub human: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub number: Option<Number>,
    pub gender: Option<Gender>,
    pub human: Option<bool>,
    pub person: Option<Person>,
}

impl Features {
    /// Overwrite the fields the hint specifies.
    pub fn apply(&mut self, hint: FeatureHint) {
        if hint.number.is_some() {
            self.number = hint.number;
        }
        if hint.gender.is_some() {
            self.gender = hint.gender;
        }
        if hint.human.is_some() {
            self.human = hint.human;
        }
    }

    /// Reconcile `other` into `self`. Person is left untouched.
    pub fn merge(&mut self, other: &Features) {
        self.number = match (self.number, other.number) {
            (mine, None) | (mine, Some(Number::Both)) => mine,
            (None, theirs) | (Some(Number::Both), theirs) => theirs,
            (Some(a), Some(b)) if a == b => Some(a),
            _ => Some(Number::Both),
        };
        self.human = match (self.human, other.human) {
            (mine, None) => mine,
            (None, theirs) => theirs,
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        };
        self.gender = match (self.gender, other.gender) {
            (mine, None) => mine,
            (None, theirs) => theirs,
            (Some(a), Some(b)) => a.reconcile(b),
        };
    }

    /// Copy everything but person from `other`.
    pub fn adopt(&mut self, other: &Features) {
        self.number = other.number;
        self.gender = other.gender;
        self.human = other.human;
    }

    /// Agreement test used before merging pronouns.
    pub fn compatible(&self, other: &Features) -> bool {
        let number = match (self.number, other.number) {
            (Some(a), Some(b)) => a == b || a == Number::Both || b == Number::Both,
            _ => true,
        };
        let gender = match (self.gender, other.gender) {
            (Some(a), Some(b)) => a.overlaps(b),
            _ => true,
        };
        let human = match (self.human, other.human) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };
        let person = match (self.person, other.person) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };
        number && gender && human && person
    }

    pub fn is_singular(&self) -> bool {
        self.number == Some(Number::Singular)
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "-".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "{}/{}/{}/{}",
            opt(self.number),
            opt(self.gender),
            opt(self.human.map(u8::from)),
            opt(self.person)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gendered(code: &str) -> Features {
        Features {
            gender: Gender::from_code(code),
            ..Features::default()
        }
    }

    #[test]
    fn gender_merge_table() {
        let mut f = gendered("f");
        f.merge(&gendered("m"));
        assert_eq!(f.gender, Some(Gender::FemMasc));

        let mut fm = gendered("fm");
        fm.merge(&gendered("m"));
        assert_eq!(fm.gender, Some(Gender::Masculine));

        let mut m = gendered("m");
        m.merge(&gendered("fm"));
        assert_eq!(m.gender, Some(Gender::Masculine));

        let mut fm = gendered("fm");
        fm.merge(&gendered("n"));
        assert_eq!(fm.gender, None);

        let mut fm = gendered("fm");
        fm.merge(&gendered("nm"));
        assert_eq!(fm.gender, None);
    }

    #[test]
    fn number_and_human_merge() {
        let mut a = Features {
            number: Some(Number::Singular),
            human: Some(true),
            ..Features::default()
        };
        a.merge(&Features {
            number: Some(Number::Plural),
            human: Some(false),
            ..Features::default()
        });
        assert_eq!(a.number, Some(Number::Both));
        assert_eq!(a.human, None);

        let mut b = Features {
            number: Some(Number::Both),
            ..Features::default()
        };
        b.merge(&Features {
            number: Some(Number::Plural),
            ..Features::default()
        });
        assert_eq!(b.number, Some(Number::Plural));
    }

    #[test]
    fn merge_leaves_person_alone() {
        let mut a = Features {
            person: Some(Person::Third),
            ..Features::default()
        };
        let b = Features {
            person: Some(Person::First),
            gender: Some(Gender::Feminine),
            ..Features::default()
        };
        a.merge(&b);
        assert_eq!(a.person, Some(Person::Third));
        assert_eq!(a.gender, Some(Gender::Feminine));
    }

    #[test]
    fn compatibility() {
        assert!(gendered("fm").compatible(&gendered("m")));
        assert!(gendered("fm").compatible(&gendered("nm")));
        assert!(!gendered("fm").compatible(&gendered("n")));
        assert!(!gendered("nm").compatible(&gendered("f")));
        assert!(!gendered("f").compatible(&gendered("m")));
        assert!(Features::default().compatible(&gendered("n")));

        let sg = Features {
            number: Some(Number::Singular),
            ..Features::default()
        };
        let both = Features {
            number: Some(Number::Both),
            ..Features::default()
        };
        let pl = Features {
            number: Some(Number::Plural),
            ..Features::default()
        };
        assert!(sg.compatible(&both));
        assert!(!sg.compatible(&pl));
    }

    #[test]
    fn parses_alpino_values() {
        assert_eq!(Person::from_persoon("3p"), Some(Person::Third));
        assert_eq!(Person::from_persoon("persoon"), None);
        assert_eq!(Number::from_getal("mv"), Some(Number::Plural));
        assert_eq!(Gender::from_code("mn"), Some(Gender::NeuterMasc));
        assert_eq!(Gender::from_code("mfn"), None);
        assert_eq!(Features::default().to_string(), "-/-/-/-");
    }
}
