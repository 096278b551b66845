//! Dutch closed-class word lists.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Function words and titles ignored when comparing content tokens.
const STOPWORD_LIST: &[&str] = &[
    "aan", "af", "al", "als", "bij", "dan", "dat", "de", "die", "dit", "een", "en", "er", "had",
    "heb", "hem", "het", "hij", "hoe", "hun", "ik", "in", "is", "je", "kan", "me", "men", "met",
    "mij", "nog", "nu", "of", "ons", "ook", "te", "tot", "uit", "van", "was", "wat", "we", "wel",
    "wij", "zal", "ze", "zei", "zij", "zo", "zou",
    // titles
    "dr.", "drs.", "ing.", "ir.", "mr.", "lic.", "prof.", "mevr.", "mw.", "bacc.", "kand.",
    "dr.h.c.", "ds.", "bc.", "dr", "drs", "ing", "ir", "mr", "lic", "prof", "mevr", "mw", "bacc",
    "kand", "dr.h.c", "ds", "bc", "mevrouw", "meneer", "heer", "doctor", "professor",
];

/// Reported-speech verbs in the form of the Alpino `root` attribute.
const SPEECH_VERB_LIST: &[&str] = &[
    "begin", "onthul", "loof", "kondig_aan", "beweer", "breng_in", "deel_mee", "merk_op",
    "zeg_op", "spreek", "breng_uit", "druk_uit", "uit", "spreek_uit", "verklaar", "verkondig",
    "vermeld", "vertel", "verwoord", "duid_aan", "benoem", "tendeer_in", "meen", "noem",
    "oordeel", "stel", "vind", "beduid", "behels", "beteken", "bewijs", "beveel", "gebied",
    "draag_op", "neem_aan", "veronderstel", "merk_aan", "verwijt", "beloof", "zeg_toe",
    "schrijf_voor", "geef_aan", "stip_aan", "kondig_af", "maak_bekend", "bericht", "beschrijf",
    "declareer", "gewaag", "meld", "geef_op", "neem_op", "teken_op", "relateer", "proclameer",
    "publiceer", "sus", "rapporteer", "leg_vast", "vernoem", "versla", "zeg", "betoon", "betuig",
    "manifesteer", "openbaar", "peer_op", "slaak", "spui", "sla_uit", "stort_uit", "stoot_uit",
    "vertolk", "ventileer", "deponeer", "expliciteer", "getuig", "ontvouw", "pretendeer",
    "doe_uiteen", "zet_uiteen", "verzeker", "kleed_in", "lucht", "breng_over", "toon", "vervat",
    "geef_weer", "betoog", "claim", "suggereer", "houd_vol", "geef_voor", "wend_voor",
    "verdedig", "vraag", "spreek_aan", "bestempel", "betitel", "kwalificeer", "som_op",
    "draai_af", "debiteer", "deel_mede", "dis_op", "kraam_uit", "verhaal", "poneer", "postuleer",
    "leg_voor", "beval", "fluister", "voorspel", "roep", "antwoord", "voeg", "reageer", "merk",
    "benadruk", "herhaal", "vervolg", "verzucht", "klaag", "protesteer", "stotter", "sis", "grom",
    "brom", "brul", "snauw", "schreeuw", "opper", "mompel", "loog", "onderbreek",
    "interrumpeer", "smeek", "gil", "mopper", "constateer", "beaam", "besluit", "concludeer",
    "vul_aan", "informeer", "zucht", "waarschuw", "verduidelijk", "stamel", "beken", "hijg",
    "kreun", "jammer", "bulder", "krijs", "snik", "prevel", "bevestig", "grinnik",
    "verontschuldig", "grap", "murmel", "bries", "piep", "kir",
];

/// Head lemmas of fixed expressions that never introduce a discourse entity
/// ("een aantal", "een keer", "in de toekomst", "op die manier").
pub const NON_REFERRING_HEADS: &[&str] = &["aantal", "keer", "toekomst", "manier"];

/// Punctuation stripped from the edges of a mention span.
pub const EDGE_PUNCTUATION: &[&str] = &[",", "'", "\"", "(", ")"];

/// Verbs describing weather, used with the dummy subject "het".
pub const WEATHER_VERBS: &[&str] = &[
    "dooien", "gieten", "hagelen", "miezeren", "misten", "motregenen", "onweren", "plenzen",
    "regenen", "sneeuwen", "stormen", "stortregenen", "ijzelen", "vriezen", "weerlichten",
    "winteren", "zomeren",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORD_LIST.iter().copied().collect());

static SPEECH_VERBS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SPEECH_VERB_LIST.iter().copied().collect());

/// Case-insensitive stopword test.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token.to_lowercase().as_str())
}

pub fn is_speech_verb(root: &str) -> bool {
    SPEECH_VERBS.contains(root)
}
