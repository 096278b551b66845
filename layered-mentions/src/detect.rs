//! Agreement feature detection for new mentions.

use crate::MentionType;
use layered_coref::lexicon::is_stopword;
use layered_coref::{
    Animacy, CorefError, CorefResult, FeatureLexicon, Features, Gender, NodeRef, Number, Person,
};

/// Derive number, gender, animacy and person from the head word, the
/// mention type and the lexicon.
///
/// Pronoun heads must carry a `persoon` attribute; its absence means the
/// parse is not usable and is reported as an error.
pub fn detect_features(
    sentno: usize,
    head: NodeRef<'_>,
    kind: MentionType,
    tokens: &[String],
    lexicon: &dyn FeatureLexicon,
) -> CorefResult<Features> {
    let mut features = Features::default();

    features.number = head
        .get("rnum")
        .or_else(|| head.get("num"))
        .and_then(Number::from_num)
        .or_else(|| head.get("getal").and_then(Number::from_getal));

    match head.get("genus") {
        Some("masc") => set_gender(&mut features, Gender::Masculine, true),
        Some("fem") => set_gender(&mut features, Gender::Feminine, true),
        Some("onz") => set_gender(&mut features, Gender::Neuter, false),
        _ if head.is("gen", "het") => set_gender(&mut features, Gender::Neuter, false),
        _ => {}
    }

    if kind == MentionType::Pronoun {
        let persoon = head.get("persoon").ok_or(CorefError::MissingAttribute {
            sentence: sentno,
            node: head.id().0,
            attribute: "persoon",
        })?;
        features.person = Person::from_persoon(persoon);
        if features.person.map_or(false, Person::is_participant) || persoon == "3p" {
            set_gender(&mut features, Gender::FemMasc, true);
        } else if persoon == "3o" {
            set_gender(&mut features, Gender::Neuter, false);
        }
        match head.lemma() {
            Some("haar") => features.gender = Some(Gender::FemNeuter),
            Some("zijn") => features.gender = Some(Gender::NeuterMasc),
            Some("hun") | Some("hen") if head.is("vwtype", "pers") => features.human = Some(true),
            _ => {}
        }
        return Ok(features);
    }

    let entry = head
        .lemma()
        .and_then(|lemma| lexicon.noun(&lemma.replace('_', "")));
    if let Some(entry) = entry {
        match entry.animacy {
            Animacy::Human => {
                let gender = entry
                    .gender
                    .filter(|g| matches!(g, Gender::Masculine | Gender::Feminine))
                    .unwrap_or(Gender::FemMasc);
                set_gender(&mut features, gender, true);
            }
            Animacy::NonHuman => set_gender(&mut features, Gender::Neuter, false),
        }
        return Ok(features);
    }

    match head.get("neclass") {
        Some("PER") => set_gender(&mut features, Gender::FemMasc, true),
        Some(_) => set_gender(&mut features, Gender::Neuter, false),
        None => {}
    }
    if let Some(hint) = lexicon.phrase(&tokens.join(" ")) {
        features.apply(hint);
    } else if head.is("neclass", "PER") {
        // fall back to the first name of a person
        if let Some(hint) = tokens
            .first()
            .filter(|first| !is_stopword(first))
            .and_then(|first| lexicon.phrase(first))
        {
            features.apply(hint);
        }
    }

    Ok(features)
}

fn set_gender(features: &mut Features, gender: Gender, human: bool) {
    features.gender = Some(gender);
    features.human = Some(human);
}
