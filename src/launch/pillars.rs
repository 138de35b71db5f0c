//! The three pillar classifiers feeding the scoring matrix.
//!
//! Each one is a pure function returning [`Level`]. Vocabularies are plain
//! immutable tables; the product-specificity vocabulary is a value
//! ([`SpecificityVocabulary`]) so it can be swapped without touching the matrix.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::category::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Level::Low => 0,
            Level::Medium => 1,
            Level::High => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factors {
    pub competition_density: Level,
    pub niche_saturation: Level,
    pub product_specificity: Level,
}

/* ----------------------------
Competition density
---------------------------- */

pub const DENSITY_LOW_BELOW: f64 = 50.0;
pub const DENSITY_MEDIUM_BELOW: f64 = 85.0;

pub fn classify_competition_density(competition_score: f64) -> Level {
    if competition_score < DENSITY_LOW_BELOW {
        Level::Low
    } else if competition_score < DENSITY_MEDIUM_BELOW {
        Level::Medium
    } else {
        Level::High
    }
}

/* ----------------------------
Niche saturation
---------------------------- */

static HIGH_SATURATION_NICHES: &[&str] = &[
    "jewelry",
    "jewellery",
    "fashion",
    "clothing",
    "apparel",
    "t-shirts",
    "t shirts",
    "phone cases",
    "beauty",
    "cosmetics",
    "home decor",
    "wall art",
    "mugs",
    "stickers",
    "accessories",
];

static MEDIUM_SATURATION_NICHES: &[&str] = &[
    "pets",
    "pet supplies",
    "fitness",
    "kitchen",
    "toys",
    "stationery",
    "crafts",
    "candles",
    "bags",
    "outdoor",
    "electronics",
    "garden",
    "baby",
    "furniture",
];

static LOW_SATURATION_NICHES: &[&str] = &[
    "woodworking",
    "aquarium",
    "beekeeping",
    "board games",
    "model trains",
    "fishing",
    "musical instruments",
    "ham radio",
    "knitting",
    "calligraphy",
    "leathercraft",
    "bonsai",
    "falconry",
    "astronomy",
    "birdwatching",
];

/// Unknown niches are treated as medium.
pub const DEFAULT_NICHE_SATURATION: Level = Level::Medium;

/// Exact match first (across all lists), then substring either direction,
/// checking high → medium → low.
pub fn classify_niche_saturation(niche: &str) -> Level {
    let n = normalize(niche);
    if n.is_empty() {
        return DEFAULT_NICHE_SATURATION;
    }
    let tiers = [
        (Level::High, HIGH_SATURATION_NICHES),
        (Level::Medium, MEDIUM_SATURATION_NICHES),
        (Level::Low, LOW_SATURATION_NICHES),
    ];
    for (level, list) in tiers {
        if list.iter().any(|k| normalize(k) == n) {
            return level;
        }
    }
    for (level, list) in tiers {
        if list.iter().any(|k| {
            let k = normalize(k);
            n.contains(k.as_str()) || k.contains(n.as_str())
        }) {
            return level;
        }
    }
    DEFAULT_NICHE_SATURATION
}

/* ----------------------------
Product specificity
---------------------------- */

/// Personalization, engraving, occasion/audience targeting, niche themes.
static HIGH_SPECIFICITY_TERMS: &[&str] = &[
    "personalized",
    "personalised",
    "custom",
    "engraved",
    "engraving",
    "monogram",
    "initials",
    "handmade",
    "hand-stamped",
    "hand stamped",
    "wedding",
    "bridal",
    "bridesmaid",
    "anniversary",
    "birthday",
    "gift",
    "memorial",
    "graduation",
    "baby shower",
    "christmas",
    "valentine",
    "mother's day",
    "father's day",
    "for mom",
    "for dad",
    "grandma",
    "coworker",
    "nurse",
    "dog lover",
    "cat lover",
    "birthstone",
    "zodiac",
    "coordinates",
    "photo",
];

/// Generic style / decor adjectives.
static MEDIUM_SPECIFICITY_TERMS: &[&str] = &[
    "vintage",
    "minimalist",
    "boho",
    "rustic",
    "retro",
    "modern",
    "elegant",
    "aesthetic",
    "dainty",
    "farmhouse",
    "bohemian",
    "scandinavian",
    "floral",
    "geometric",
    "abstract",
    "gothic",
];

/// `{type}` marks where the product type sits. Matched against the
/// lower-cased, whitespace-collapsed title.
static GENERIC_TITLE_TEMPLATES: &[&str] = &[
    r"^(white|black|silver|gold|golden|red|blue|green|pink|purple|grey|gray|brown|beige|rose gold)\s+{type}s?$",
    r"^(simple|basic|plain|classic|cheap)\s+{type}s?$",
    r"^(small|large|big|mini)\s+{type}s?$",
    r"^{type}s?$",
];

/// Stands in for the product type both in compiled templates and in the
/// title being matched, so templates compile once per vocabulary.
const TYPE_SLOT: &str = "__type__";

/// Swappable keyword vocabulary for the specificity pillar.
#[derive(Debug, Clone)]
pub struct SpecificityVocabulary {
    high_terms: Vec<String>,
    medium_terms: Vec<String>,
    generic_titles: Vec<Regex>,
}

static DEFAULT_VOCABULARY: Lazy<SpecificityVocabulary> = Lazy::new(|| {
    SpecificityVocabulary::new(
        HIGH_SPECIFICITY_TERMS.iter().copied(),
        MEDIUM_SPECIFICITY_TERMS.iter().copied(),
        GENERIC_TITLE_TEMPLATES.iter().copied(),
    )
});

/// Keyword hits behind a specificity classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecificityHits {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    /// Diagnostic only: a generic title carries no hits, so it is already Low.
    pub generic_title: bool,
}

impl SpecificityHits {
    pub fn level(&self) -> Level {
        if self.high.len() >= 2 {
            Level::High
        } else if !self.high.is_empty() || self.medium.len() >= 2 {
            Level::Medium
        } else {
            Level::Low
        }
    }
}

impl SpecificityVocabulary {
    /// Compiles the generic-title templates once. A template that fails to
    /// compile is logged and skipped.
    pub fn new<H, M, T>(high_terms: H, medium_terms: M, generic_title_templates: T) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let generic_titles = generic_title_templates
            .into_iter()
            .filter_map(|tpl| {
                let pattern = tpl.as_ref().replace("{type}", TYPE_SLOT);
                match Regex::new(&pattern) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(pattern = %pattern, error = %e, "invalid generic title pattern");
                        None
                    }
                }
            })
            .collect();
        Self {
            high_terms: high_terms.into_iter().map(Into::into).collect(),
            medium_terms: medium_terms.into_iter().map(Into::into).collect(),
            generic_titles,
        }
    }

    pub fn builtin() -> &'static SpecificityVocabulary {
        &DEFAULT_VOCABULARY
    }

    pub fn high_terms(&self) -> &[String] {
        &self.high_terms
    }

    pub fn medium_terms(&self) -> &[String] {
        &self.medium_terms
    }

    /// Case-insensitive substring scan of `title + description`.
    pub fn scan(&self, title: &str, product_type: &str, description: Option<&str>) -> SpecificityHits {
        let mut text = title.to_lowercase();
        if let Some(d) = description {
            text.push(' ');
            text.push_str(&d.to_lowercase());
        }
        SpecificityHits {
            high: matching_terms(&self.high_terms, &text),
            medium: matching_terms(&self.medium_terms, &text),
            generic_title: self.is_generic_title(title, product_type),
        }
    }

    pub fn is_generic_title(&self, title: &str, product_type: &str) -> bool {
        let title = collapse_whitespace(title);
        let ptype = collapse_whitespace(product_type);
        if title.is_empty() || ptype.is_empty() {
            return false;
        }
        let slotted = title.replace(&ptype, TYPE_SLOT);
        self.generic_titles.iter().any(|re| re.is_match(&slotted))
    }

    pub fn classify(&self, title: &str, product_type: &str, description: Option<&str>) -> Level {
        self.scan(title, product_type, description).level()
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn matching_terms(terms: &[String], text: &str) -> Vec<String> {
    terms
        .iter()
        .filter(|t| !t.is_empty() && text.contains(t.to_lowercase().as_str()))
        .cloned()
        .collect()
}

/// Specificity with the built-in vocabulary.
pub fn classify_product_specificity(
    title: &str,
    product_type: &str,
    description: Option<&str>,
) -> Level {
    SpecificityVocabulary::builtin().classify(title, product_type, description)
}

/* ----------------------------
Jewelry detection
---------------------------- */

static JEWELRY_TERMS: &[&str] = &[
    "jewelry",
    "jewellery",
    "jewel",
    "bracelet",
    "necklace",
    "ring",
    "earring",
    "pendant",
    "anklet",
    "bangle",
    "charm",
    "brooch",
    "choker",
    "cufflink",
];

/// Compound product types whose head noun is a jewelry word but which are
/// not jewelry.
static NON_JEWELRY_COMPOUNDS: &[&str] = &[
    "key ring",
    "napkin ring",
    "teething ring",
    "curtain ring",
    "shower ring",
    "key charm",
];

/// True when any word of the niche, or the head noun (last word) of the
/// product type, names jewelry. Plurals count; "string" is not a ring and
/// neither is a "ring light".
pub fn is_jewelry(niche: &str, product_type: &str) -> bool {
    let niche = niche.to_lowercase();
    if words(&niche).any(is_jewelry_word) {
        return true;
    }
    let ptype = product_type.to_lowercase();
    let ptype_words: Vec<&str> = words(&ptype).collect();
    let Some(head) = ptype_words.last().copied() else {
        return false;
    };
    if !is_jewelry_word(head) {
        return false;
    }
    let joined = ptype_words.join(" ");
    !NON_JEWELRY_COMPOUNDS
        .iter()
        .any(|c| joined == *c || joined.ends_with(&format!(" {c}")) || joined == format!("{c}s"))
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty())
}

fn is_jewelry_word(w: &str) -> bool {
    let singular = w.strip_suffix('s').unwrap_or(w);
    JEWELRY_TERMS.contains(&w) || JEWELRY_TERMS.contains(&singular)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_thresholds() {
        assert_eq!(classify_competition_density(0.0), Level::Low);
        assert_eq!(classify_competition_density(49.9), Level::Low);
        assert_eq!(classify_competition_density(50.0), Level::Medium);
        assert_eq!(classify_competition_density(84.9), Level::Medium);
        assert_eq!(classify_competition_density(85.0), Level::High);
        assert_eq!(classify_competition_density(100.0), Level::High);
    }

    #[test]
    fn niche_lists_and_default() {
        assert_eq!(classify_niche_saturation("Jewelry"), Level::High);
        assert_eq!(classify_niche_saturation("Home-Decor"), Level::High);
        assert_eq!(classify_niche_saturation("kitchen"), Level::Medium);
        assert_eq!(classify_niche_saturation("Beekeeping"), Level::Low);
        assert_eq!(classify_niche_saturation("vintage board games"), Level::Low);
        assert_eq!(classify_niche_saturation("quantum widgets"), Level::Medium);
        assert_eq!(classify_niche_saturation(""), Level::Medium);
    }

    #[test]
    fn two_high_hits_are_high() {
        assert_eq!(
            classify_product_specificity(
                "Personalized Wedding Bracelet Engraved Gift",
                "bracelet",
                None
            ),
            Level::High
        );
    }

    #[test]
    fn one_high_or_two_medium_hits_are_medium() {
        assert_eq!(
            classify_product_specificity("Birthday Candle", "candle", None),
            Level::Medium
        );
        assert_eq!(
            classify_product_specificity("Rustic Vintage Wooden Sign", "sign", None),
            Level::Medium
        );
    }

    #[test]
    fn generic_titles_are_low() {
        assert_eq!(
            classify_product_specificity("Silver Bracelet", "bracelet", None),
            Level::Low
        );
        assert_eq!(
            classify_product_specificity("White Mugs", "mug", None),
            Level::Low
        );
        assert_eq!(classify_product_specificity("Lamp", "lamp", None), Level::Low);
        // a single medium hit is still low
        assert_eq!(
            classify_product_specificity("Modern Oak Shelf", "shelf", None),
            Level::Low
        );
    }

    #[test]
    fn description_contributes_hits() {
        let lvl = classify_product_specificity(
            "Silver Bracelet",
            "bracelet",
            Some("Hand stamped with custom initials"),
        );
        assert_eq!(lvl, Level::High);
    }

    #[test]
    fn vocabulary_is_swappable() {
        let vocab = SpecificityVocabulary::new(
            ["cosplay", "anime"],
            Vec::<String>::new(),
            [r"^plain\s+{type}$"],
        );
        assert_eq!(vocab.classify("Anime Cosplay Wig", "wig", None), Level::High);
        assert_eq!(vocab.classify("Personalized Wig", "wig", None), Level::Low);
        assert!(vocab.is_generic_title("Plain  Wig", "wig"));
        assert!(!vocab.is_generic_title("Silver Wig", "wig"));
    }

    #[test]
    fn broken_template_is_ignored() {
        let vocab = SpecificityVocabulary::new(
            Vec::<String>::new(),
            Vec::<String>::new(),
            [r"^(unclosed {type}", r"^{type}s?$"],
        );
        assert!(!vocab.is_generic_title("unclosed ring", "ring"));
        assert!(vocab.is_generic_title("Rings", "ring"));
    }

    #[test]
    fn jewelry_detection_is_word_level() {
        assert!(is_jewelry("jewelry", "bracelet"));
        assert!(is_jewelry("Accessories", "Earrings"));
        assert!(is_jewelry("gifts", "charm"));
        assert!(!is_jewelry("crafts", "string"));
        assert!(!is_jewelry("home decor", "candle"));
    }

    #[test]
    fn jewelry_type_is_judged_by_its_head_noun() {
        assert!(is_jewelry("gifts", "Charm Bracelets"));
        assert!(is_jewelry("accessories", "wedding ring"));
        assert!(!is_jewelry("electronics", "ring light"));
        assert!(!is_jewelry("home", "Key Ring"));
        assert!(!is_jewelry("kitchen", "napkin rings"));
        assert!(!is_jewelry("electronics", ""));
        // a jewelry niche still counts whatever the type
        assert!(is_jewelry("jewelry", "gift box"));
    }

    #[test]
    fn generic_title_tolerates_irregular_spacing() {
        let vocab = SpecificityVocabulary::builtin();
        assert!(vocab.is_generic_title("Cutting  Board", "cutting  board"));
        assert!(vocab.is_generic_title("  Small   Cutting Boards ", "cutting board"));
        assert!(!vocab.is_generic_title("Small Earring", "ring"));
    }

    #[test]
    fn generic_flag_does_not_change_the_level() {
        let generic = SpecificityHits {
            generic_title: true,
            ..SpecificityHits::default()
        };
        assert_eq!(generic.level(), SpecificityHits::default().level());
    }
}
