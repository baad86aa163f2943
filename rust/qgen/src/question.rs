//! Question types and the entity-type table that selects them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::EntityType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "WHO")]
    Who,
    #[serde(rename = "WHERE")]
    Where,
    #[serde(rename = "WHEN")]
    When,
    #[serde(rename = "WHAT")]
    What,
    #[serde(rename = "WHICH")]
    Which,
    #[serde(rename = "HOW MANY")]
    HowMany,
    #[serde(rename = "HOW LONG")]
    HowLong,
    #[serde(rename = "HOW MUCH")]
    HowMuch,
    #[serde(rename = "HOW FAST")]
    HowFast,
    #[serde(rename = "HOW")]
    How,
    #[serde(rename = "Y/N")]
    YesNo,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Who => "WHO",
            QuestionType::Where => "WHERE",
            QuestionType::When => "WHEN",
            QuestionType::What => "WHAT",
            QuestionType::Which => "WHICH",
            QuestionType::HowMany => "HOW MANY",
            QuestionType::HowLong => "HOW LONG",
            QuestionType::HowMuch => "HOW MUCH",
            QuestionType::HowFast => "HOW FAST",
            QuestionType::How => "HOW",
            QuestionType::YesNo => "Y/N",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use QuestionType::*;

/// Entity type, question type and question phrase. Types are compared
/// without regard to case.
const TABLE: &[(&str, QuestionType, &str)] = &[
    // General types
    ("person", Who, "who"),
    ("location", Where, "where"),
    ("organization", What, "what organization"),
    ("date", When, "when"),
    ("educationalInstitution", Which, "which school"),
    ("frequency", What, "what frequency"),
    ("percentage", What, "what percentage"),
    ("time", What, "what time"),
    ("url", What, "what URL"),
    ("weekday", When, "which day"),
    ("zipcode", What, "what zipcode"),
    // Measurements
    ("angle", What, "what angle"),
    ("area", What, "what area"),
    ("duration", What, "what duration"),
    ("gallons", HowMany, "how many gallons"),
    ("grams", HowMany, "how many grams"),
    ("length", HowLong, "how long"),
    ("liters", HowMany, "how many liters"),
    ("miles", HowMany, "how many miles"),
    ("money", HowMuch, "how much money"),
    ("mph", HowFast, "how fast"),
    ("ounces", HowMany, "how many ounces"),
    ("pounds", HowMany, "how many pounds"),
    ("range", What, "what range"),
    ("size", What, "what size"),
    ("speed", How, "how fast"),
    ("temperature", What, "what temperature"),
    ("tons", HowMany, "how many tons"),
    ("volume", HowMuch, "how much volume"),
    ("weight", HowMuch, "how much weight"),
    // List types
    ("actor", Which, "which actor"),
    ("airport", Which, "which airport"),
    ("animal", What, "what animal"),
    ("anthem", What, "what anthem"),
    ("author", Which, "which author"),
    ("award", Which, "which award"),
    ("bacteria", What, "what bacteria"),
    ("bird", What, "what bird"),
    ("birthstone", What, "what birthstone"),
    ("bodyPart", What, "what bodypart"),
    ("book", What, "what book"),
    ("canal", What, "what canal"),
    ("capital", Which, "which capital city"),
    ("chemicalElement", What, "what chemical element"),
    ("color", What, "what color"),
    ("competition", What, "what competition"),
    ("conflict", What, "what war"),
    ("continent", Which, "which continent"),
    ("country", Which, "which country"),
    ("crime", What, "what crime"),
    ("currency", What, "what currency"),
    ("director", Which, "which director"),
    ("disease", What, "what disease"),
    ("drug", What, "what drug"),
    ("ethnicGroup", What, "what ethnic group"),
    ("festival", What, "what festival"),
    ("film", What, "what film"),
    ("filmType", What, "what film type"),
    ("firstName", Who, "who"),
    ("flower", What, "what flower"),
    ("fruit", What, "what fruit"),
    ("hemisphere", Which, "which hemisphere"),
    ("island", What, "what island"),
    ("lake", What, "what lake"),
    ("language", What, "what language"),
    ("material", What, "what material"),
    ("mathematician", Which, "which mathematician"),
    ("medicalTreatment", What, "what medical treatment"),
    ("medicinal", What, "what medicinal"),
    ("metal", What, "what metal"),
    ("militaryRank", What, "what military rank"),
    ("mineral", What, "what mineral"),
    ("ministry", What, "what ministry"),
    ("mountain", What, "what mountain"),
    ("mountainRange", What, "what mountain range"),
    ("musical", What, "what musical"),
    ("musicalInstrument", What, "what musical instrument"),
    ("musicType", What, "what music type"),
    ("narcotic", What, "what narcotic"),
    ("nationality", What, "what nationality"),
    ("nationalPark", What, "what nationalPark"),
    ("newspaper", What, "what newspaper"),
    ("nobleTitle", What, "what noble title"),
    ("ocean", What, "what ocean"),
    ("opera", What, "what opera"),
    ("pathogen", What, "what pathogen"),
    ("peninsula", What, "what peninsula"),
    ("planet", What, "what planet"),
    ("plant", What, "what plant"),
    ("playwright", What, "what playwright"),
    ("policeRank", What, "what police rank"),
    ("politicalParty", What, "what political party"),
    ("profession", Who, "who"),
    ("radioStation", What, "what radio station"),
    ("relation", What, "what relation"),
    ("religion", What, "what religion"),
    ("river", What, "what river"),
    ("scientist", Which, "which scientist"),
    ("sea", What, "what sea"),
    ("season", What, "what season"),
    ("show", What, "what show"),
    ("showType", What, "what show type"),
    ("socialTitle", Who, "who"),
    ("sport", What, "what sport"),
    ("stadium", What, "what stadium"),
    ("stone", What, "what stone"),
    ("style", What, "what style"),
    ("team", What, "what team"),
    ("therapy", What, "what therapy"),
    ("timezone", What, "what timezone"),
    ("tvChannel", What, "what TV channel"),
    ("usPresident", Which, "which US president"),
    ("vaccine", What, "what vaccine"),
    ("virus", What, "what virus"),
    ("zodiacSign", What, "what zodiacSign"),
    // Noun phrases no tagger recognized
    ("np", What, "what"),
];

/// The question type and phrase asking for an entity of type `entity`,
/// if the table has one.
pub fn classify(entity: &EntityType) -> Option<(QuestionType, &'static str)> {
    TABLE
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(entity.as_str()))
        .map(|(_, question, phrase)| (*question, *phrase))
}

/// The question phrase after a preposition: `in which location` rather
/// than `in where`.
pub fn with_preposition(preposition: &str, phrase: &str) -> String {
    let phrase = match phrase {
        "when" => "which day",
        "where" => "which location",
        other => other,
    };
    format!("{preposition} {phrase}")
}
