//! A small verb lexicon.
//!
//! [`VerbTable`] answers lemma lookups for verbs from a table of irregular
//! forms and a list of known base forms, falling back to the regular
//! inflection rules for verbs it has never seen. A word that is none of
//! these has no lemma: `bit` is only known through the irregular table.

use std::collections::{HashMap, HashSet};

use crate::capability::{Lexicon, PartOfSpeech};

/// Inflected forms that no suffix rule recovers.
const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("'s", "be"),
    ("'m", "be"),
    ("'re", "be"),
    ("has", "have"),
    ("had", "have"),
    ("'ve", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("began", "begin"),
    ("begun", "begin"),
    ("bit", "bite"),
    ("bitten", "bite"),
    ("blew", "blow"),
    ("blown", "blow"),
    ("bought", "buy"),
    ("brought", "bring"),
    ("built", "build"),
    ("came", "come"),
    ("caught", "catch"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("drank", "drink"),
    ("drove", "drive"),
    ("dug", "dig"),
    ("driven", "drive"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("felt", "feel"),
    ("fed", "feed"),
    ("fought", "fight"),
    ("found", "find"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("gave", "give"),
    ("given", "give"),
    ("got", "get"),
    ("gotten", "get"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("hid", "hide"),
    ("hidden", "hide"),
    ("hit", "hit"),
    ("hung", "hang"),
    ("heard", "hear"),
    ("held", "hold"),
    ("kept", "keep"),
    ("knelt", "kneel"),
    ("knew", "know"),
    ("known", "know"),
    ("led", "lead"),
    ("left", "leave"),
    ("let", "let"),
    ("lit", "light"),
    ("lost", "lose"),
    ("made", "make"),
    ("meant", "mean"),
    ("met", "meet"),
    ("paid", "pay"),
    ("put", "put"),
    ("quit", "quit"),
    ("read", "read"),
    ("ran", "run"),
    ("rode", "ride"),
    ("ridden", "ride"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("rang", "ring"),
    ("rung", "ring"),
    ("said", "say"),
    ("saw", "see"),
    ("seen", "see"),
    ("sold", "sell"),
    ("sent", "send"),
    ("set", "set"),
    ("shook", "shake"),
    ("shaken", "shake"),
    ("shut", "shut"),
    ("slid", "slide"),
    ("shot", "shoot"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("sat", "sit"),
    ("slept", "sleep"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("spent", "spend"),
    ("split", "split"),
    ("spread", "spread"),
    ("sprang", "spring"),
    ("stood", "stand"),
    ("stole", "steal"),
    ("stolen", "steal"),
    ("stuck", "stick"),
    ("struck", "strike"),
    ("swam", "swim"),
    ("swore", "swear"),
    ("swept", "sweep"),
    ("took", "take"),
    ("taken", "take"),
    ("taught", "teach"),
    ("tore", "tear"),
    ("torn", "tear"),
    ("told", "tell"),
    ("thought", "think"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("understood", "understand"),
    ("woke", "wake"),
    ("won", "win"),
    ("wound", "wind"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("wrote", "write"),
    ("written", "write"),
    ("born", "bear"),
    ("bore", "bear"),
    ("became", "become"),
    ("broke", "break"),
    ("broken", "break"),
    ("cost", "cost"),
    ("cut", "cut"),
    ("died", "die"),
    ("lay", "lie"),
    ("lain", "lie"),
];

/// Base forms used to choose between candidate stems (`liked` could be
/// `like` or `lik`).
const BASE_FORMS: &[&str] = &[
    "agree", "arrive", "be", "bake", "believe", "care", "cause", "change", "close", "compare",
    "complete", "continue", "create", "dance", "decide", "declare", "describe", "die", "dine",
    "drive", "escape", "found", "give", "graduate", "hate", "have", "hope", "include", "introduce",
    "invade", "issue", "joke", "lie", "like", "live", "locate", "love", "make", "manage", "move",
    "name", "note", "oppose", "place", "play", "please", "prepare", "produce", "promote", "prove",
    "provide", "raise", "receive", "release", "remove", "replace", "require", "resolve",
    "retire", "rule", "save", "score", "serve", "share", "smile", "state", "store", "argue",
    "suppose", "surprise", "use", "vote", "wave", "write",
];

/// Verb lemmas from irregular forms, known base forms and suffix rules.
#[derive(Debug, Clone)]
pub struct VerbTable {
    irregular: HashMap<String, String>,
    base_forms: HashSet<String>,
}

impl Default for VerbTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VerbTable {
    pub fn new() -> Self {
        VerbTable {
            irregular: IRREGULAR
                .iter()
                .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
                .collect(),
            base_forms: BASE_FORMS
                .iter()
                .chain(IRREGULAR.iter().map(|(_, lemma)| lemma))
                .map(|form| form.to_string())
                .collect(),
        }
    }

    /// Register an irregular form.
    pub fn register_irregular(&mut self, form: &str, lemma: &str) {
        self.irregular.insert(form.to_lowercase(), lemma.to_lowercase());
        self.base_forms.insert(lemma.to_lowercase());
    }

    /// Register a base form, so suffix stripping can recognize it.
    pub fn register_base(&mut self, lemma: &str) {
        self.base_forms.insert(lemma.to_lowercase());
    }

    fn verb_lemma(&self, word: &str) -> Option<String> {
        let word = word.to_lowercase();
        if word.is_empty() || !word.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-') {
            return None;
        }
        if let Some(lemma) = self.irregular.get(&word) {
            return Some(lemma.clone());
        }
        if self.base_forms.contains(&word) {
            return Some(word);
        }

        let candidates = detach(&word);
        if let Some(known) = candidates.iter().find(|c| self.base_forms.contains(*c)) {
            return Some(known.clone());
        }
        regular_stem(&word)
    }
}

impl Lexicon for VerbTable {
    fn lemma(&self, word: &str, pos: PartOfSpeech) -> Option<String> {
        match pos {
            PartOfSpeech::Verb => self.verb_lemma(word),
            _ => None,
        }
    }
}

/// Every stem the verb suffix rules can produce for `word`.
fn detach(word: &str) -> Vec<String> {
    const RULES: &[(&str, &str)] = &[
        ("s", ""),
        ("ies", "y"),
        ("es", "e"),
        ("es", ""),
        ("ed", "e"),
        ("ed", ""),
        ("ing", "e"),
        ("ing", ""),
    ];
    RULES
        .iter()
        .filter_map(|(suffix, replacement)| {
            let stem = word.strip_suffix(suffix)?;
            (stem.len() > 1).then(|| format!("{stem}{replacement}"))
        })
        .collect()
}

/// The stem a regular inflection most likely came from.
fn regular_stem(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        return Some(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("ied") {
        return Some(format!("{stem}y"));
    }
    for sibilant in ["sses", "shes", "ches", "xes", "zes"] {
        if word.ends_with(sibilant) {
            return word.strip_suffix("es").map(str::to_string);
        }
    }
    if let Some(stem) = word.strip_suffix("ed").or_else(|| word.strip_suffix("ing")) {
        if stem.len() < 2 {
            return None;
        }
        return Some(undouble(stem));
    }
    if !word.ends_with("ss") && !word.ends_with("us") {
        if let Some(stem) = word.strip_suffix('s') {
            return (stem.len() > 1).then(|| stem.to_string());
        }
    }
    None
}

/// `stopp` becomes `stop`; `call` and `pass` keep their double letter.
fn undouble(stem: &str) -> String {
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a == b && !"aeioulsz".contains(a) => {
            stem[..stem.len() - a.len_utf8()].to_string()
        }
        _ => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn verb(word: &str) -> Option<String> {
        VerbTable::new().lemma(word, PartOfSpeech::Verb)
    }

    #[test]
    fn irregular_forms() {
        assert_eq!(verb("was").as_deref(), Some("be"));
        assert_eq!(verb("Saw").as_deref(), Some("see"));
        assert_eq!(verb("went").as_deref(), Some("go"));
        assert_eq!(verb("born").as_deref(), Some("bear"));
    }

    #[test]
    fn regular_forms() {
        assert_eq!(verb("plays").as_deref(), Some("play"));
        assert_eq!(verb("liked").as_deref(), Some("like"));
        assert_eq!(verb("stopped").as_deref(), Some("stop"));
        assert_eq!(verb("called").as_deref(), Some("call"));
        assert_eq!(verb("carries").as_deref(), Some("carry"));
        assert_eq!(verb("watches").as_deref(), Some("watch"));
        assert_eq!(verb("walking").as_deref(), Some("walk"));
        assert_eq!(verb("see").as_deref(), Some("see"));
        assert_eq!(verb("bit").as_deref(), Some("bite"));
    }

    #[test]
    fn unknown_uninflected_words_have_no_lemma() {
        assert_eq!(verb("smote"), None);
        assert_eq!(verb("glimpse"), None);
    }

    #[test]
    fn only_verbs_are_analysed() {
        assert_eq!(verb("42"), None);
        assert_eq!(verb(""), None);
        assert_eq!(VerbTable::new().lemma("dogs", PartOfSpeech::Noun), None);
    }

    #[test]
    fn registered_forms_take_precedence() {
        let mut table = VerbTable::new();
        table.register_irregular("smote", "smite");
        table.register_base("grieve");
        assert_eq!(table.lemma("smote", PartOfSpeech::Verb).as_deref(), Some("smite"));
        assert_eq!(table.lemma("grieved", PartOfSpeech::Verb).as_deref(), Some("grieve"));
    }
}
