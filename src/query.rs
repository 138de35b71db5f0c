//! # Query Generator
//! Derives 3–5 diversified search queries for a product so the competition
//! estimate does not hinge on a single keyword.
//!
//! Each query combines the product type with one of:
//! - the most salient title token (longest non-stopword, first wins on ties),
//! - a synonym of the product type,
//! - a typical-usage term of the product type,
//! - one detected style adjective.
//!
//! When that yields fewer than [`MIN_QUERIES`], the remaining title tokens and
//! seller keywords pad the list as `"{type} {token}"`, then the niche as
//! `"{niche} {type}"`, and the bare product type closes it. Output order is stable for identical input.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::request::ScoringRequest;

pub const MIN_QUERIES: usize = 3;
pub const MAX_QUERIES: usize = 5;

/// Last-resort product type when the request carries none.
const FALLBACK_PRODUCT_TYPE: &str = "product";

static STOPWORDS: &[&str] = &[
    // articles, connectors
    "a", "an", "the", "and", "or", "for", "with", "of", "in", "on", "to", "by", "from", "your",
    "my", "our", // generic marketing adjectives
    "best", "new", "premium", "quality", "high", "great", "perfect", "amazing", "awesome", "top",
    "beautiful", "cool", "unique", "hot", "sale", "cheap", "free", "shipping", "original",
    "authentic", "luxury", "stylish", "trendy", "popular", "set", "pcs", "pack",
];

/// Checked in order; only the first hit is used.
static STYLE_TERMS: &[&str] = &[
    "vintage",
    "minimalist",
    "boho",
    "rustic",
    "retro",
    "modern",
    "farmhouse",
    "industrial",
    "scandinavian",
    "bohemian",
    "gothic",
    "kawaii",
    "art deco",
    "mid century",
];

static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bracelet", "bangle"),
        ("necklace", "pendant"),
        ("ring", "band"),
        ("earrings", "studs"),
        ("earring", "stud"),
        ("mug", "cup"),
        ("t-shirt", "tee"),
        ("tshirt", "tee"),
        ("shirt", "tee"),
        ("hoodie", "sweatshirt"),
        ("poster", "print"),
        ("lamp", "light"),
        ("bag", "tote"),
        ("pillow", "cushion"),
        ("sticker", "decal"),
        ("wallet", "purse"),
        ("hat", "cap"),
        ("phone case", "phone cover"),
        ("blanket", "throw"),
        ("notebook", "journal"),
        ("sofa", "couch"),
        ("rug", "carpet"),
    ])
});

static USAGE_TERMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bracelet", "gift"),
        ("necklace", "gift"),
        ("ring", "gift"),
        ("earrings", "gift"),
        ("mug", "coffee"),
        ("t-shirt", "casual"),
        ("hoodie", "casual"),
        ("poster", "wall decor"),
        ("lamp", "bedroom"),
        ("candle", "home"),
        ("bag", "travel"),
        ("pillow", "sofa"),
        ("blanket", "sofa"),
        ("notebook", "office"),
        ("wallet", "everyday"),
        ("phone case", "protective"),
        ("desk", "office"),
        ("rug", "living room"),
    ])
});

/// Generate the ordered, distinct list of query variants for `req`.
pub fn generate_queries(req: &ScoringRequest) -> Vec<String> {
    let title_lower = req.product_title.to_lowercase();
    let ptype = resolve_product_type(req);
    let type_tokens: Vec<String> = tokenize(&ptype).collect();

    let style = detect_style(&title_lower);
    let style_words = style_words_in(&title_lower);

    let mut content: Vec<String> = Vec::new();
    for tok in tokenize(&title_lower) {
        if is_content_token(&tok, &type_tokens)
            && !style_words.contains(&tok.as_str())
            && !content.contains(&tok)
        {
            content.push(tok);
        }
    }

    let salient = most_salient(&content).map(str::to_string);

    let mut out = QuerySet::default();

    if let Some(tok) = salient.as_deref() {
        out.push(format!("{tok} {ptype}"));
    }
    if let Some(syn) = lookup(&SYNONYMS, &ptype) {
        match salient.as_deref() {
            Some(tok) => out.push(format!("{tok} {syn}")),
            None => out.push(syn.to_string()),
        }
    }
    if let Some(usage) = lookup(&USAGE_TERMS, &ptype) {
        out.push(format!("{usage} {ptype}"));
    }
    if let Some(style) = style {
        out.push(format!("{style} {ptype}"));
    }

    if out.len() < MIN_QUERIES {
        let keywords = req
            .keywords
            .iter()
            .map(|k| normalize_phrase(k))
            .filter(|k| !k.is_empty());
        let remaining = content
            .iter()
            .filter(|t| Some(t.as_str()) != salient.as_deref())
            .cloned()
            .chain(keywords);
        for tok in remaining {
            if out.len() >= MIN_QUERIES {
                break;
            }
            out.push(format!("{ptype} {tok}"));
        }
    }

    if out.len() < MIN_QUERIES {
        let niche = normalize_phrase(&req.category);
        if !niche.is_empty() && niche != ptype {
            out.push(format!("{niche} {ptype}"));
        }
    }

    if out.len() < MIN_QUERIES {
        out.push(ptype.clone());
    }

    out.into_vec()
}

/// Lower-cased, whitespace-collapsed product type with graceful fallbacks:
/// first title token, then the niche, then a generic placeholder.
fn resolve_product_type(req: &ScoringRequest) -> String {
    let ptype = normalize_phrase(&req.product_type);
    if !ptype.is_empty() {
        return ptype;
    }
    let lower = req.product_title.to_lowercase();
    if let Some(tok) = tokenize(&lower).find(|t| !is_stopword(t)) {
        return tok;
    }
    let niche = normalize_phrase(&req.category);
    if !niche.is_empty() {
        return niche;
    }
    FALLBACK_PRODUCT_TYPE.to_string()
}

fn normalize_phrase(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Alphanumeric tokens, lower-case. Hyphenated words stay whole ("t-shirt").
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .map(|t| t.trim_matches('-'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn is_stopword(tok: &str) -> bool {
    STOPWORDS.contains(&tok)
}

fn is_content_token(tok: &str, type_tokens: &[String]) -> bool {
    tok.chars().count() >= 3
        && !is_stopword(tok)
        && !tok.chars().all(|c| c.is_ascii_digit())
        && !type_tokens.iter().any(|t| t == tok || singular(t) == singular(tok))
}

fn singular(s: &str) -> &str {
    s.strip_suffix('s').unwrap_or(s)
}

fn most_salient(tokens: &[String]) -> Option<&str> {
    let mut best: Option<&str> = None;
    for t in tokens {
        match best {
            Some(b) if b.chars().count() >= t.chars().count() => {}
            _ => best = Some(t.as_str()),
        }
    }
    best
}

fn detect_style(title_lower: &str) -> Option<&'static str> {
    STYLE_TERMS.iter().copied().find(|s| title_lower.contains(s))
}

/// Every word of every style term present in the title. None of them may
/// drive a query other than the single style query.
fn style_words_in(title_lower: &str) -> Vec<&'static str> {
    STYLE_TERMS
        .iter()
        .copied()
        .filter(|s| title_lower.contains(s))
        .flat_map(|s| s.split(' '))
        .collect()
}

fn lookup(table: &HashMap<&'static str, &'static str>, ptype: &str) -> Option<&'static str> {
    table
        .get(ptype)
        .or_else(|| table.get(singular(ptype)))
        .copied()
}

/// Insertion-ordered, case-insensitively distinct, capped list of queries.
#[derive(Default)]
struct QuerySet {
    items: Vec<String>,
}

impl QuerySet {
    fn push(&mut self, q: String) {
        let q = normalize_phrase(&q);
        if q.is_empty() || self.items.len() >= MAX_QUERIES || self.items.contains(&q) {
            return;
        }
        self.items.push(q);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(title: &str, ptype: &str, niche: &str) -> ScoringRequest {
        ScoringRequest::new(title, ptype, niche)
    }

    #[test]
    fn personalized_bracelet_gets_salient_synonym_and_usage() {
        let q = generate_queries(&req(
            "Personalized Wedding Bracelet Engraved Gift",
            "bracelet",
            "jewelry",
        ));
        assert_eq!(
            q,
            vec![
                "personalized bracelet".to_string(),
                "personalized bangle".to_string(),
                "gift bracelet".to_string(),
            ]
        );
    }

    #[test]
    fn style_adjective_adds_one_query() {
        let q = generate_queries(&req("Vintage Brass Desk Lamp", "lamp", "home decor"));
        assert_eq!(
            q,
            vec![
                "brass lamp".to_string(),
                "brass light".to_string(),
                "bedroom lamp".to_string(),
                "vintage lamp".to_string(),
            ]
        );
    }

    #[test]
    fn stopwords_are_never_salient() {
        let q = generate_queries(&req("The Best Premium Amazing Quality Hoodie", "hoodie", "apparel"));
        assert_eq!(
            q,
            vec![
                "sweatshirt".to_string(),
                "casual hoodie".to_string(),
                "apparel hoodie".to_string(),
            ]
        );
    }

    #[test]
    fn pads_with_remaining_title_tokens() {
        let q = generate_queries(&req("Walnut Oak Cutting Board", "cutting board", "kitchen"));
        assert_eq!(q[0], "walnut cutting board");
        assert!(q.len() >= MIN_QUERIES);
        assert!(q.contains(&"cutting board oak".to_string()));
    }

    #[test]
    fn keywords_pad_after_title_tokens() {
        let r = req("Terrarium", "terrarium", "plants").with_keywords(["Moss", "glass jar"]);
        let q = generate_queries(&r);
        assert_eq!(
            q,
            vec![
                "terrarium moss".to_string(),
                "terrarium glass jar".to_string(),
                "plants terrarium".to_string(),
            ]
        );
    }

    #[test]
    fn untabled_type_pads_with_niche() {
        let q = generate_queries(&req("Blue Widget", "widget", "gadgets"));
        assert_eq!(
            q,
            vec![
                "blue widget".to_string(),
                "gadgets widget".to_string(),
                "widget".to_string(),
            ]
        );

        // a niche equal to the type adds nothing
        let q = generate_queries(&req("Blue Widget", "widget", "Widget"));
        assert_eq!(q, vec!["blue widget".to_string(), "widget".to_string()]);
    }

    #[test]
    fn second_style_word_never_becomes_salient() {
        let q = generate_queries(&req("Vintage Boho Lamp", "lamp", "home decor"));
        assert_eq!(
            q,
            vec![
                "light".to_string(),
                "bedroom lamp".to_string(),
                "vintage lamp".to_string(),
            ]
        );
        assert_eq!(q.iter().filter(|s| s.contains("boho")).count(), 0);
    }

    #[test]
    fn empty_input_still_yields_a_query() {
        let q = generate_queries(&req("", "", ""));
        assert_eq!(q, vec!["product".to_string()]);

        let q = generate_queries(&req("", "mug", ""));
        assert_eq!(q, vec!["cup".to_string(), "coffee mug".to_string(), "mug".to_string()]);
    }

    #[test]
    fn output_is_distinct_and_stable() {
        let r = req("Minimalist Gold Ring Gold Ring", "ring", "jewelry");
        let a = generate_queries(&r);
        let b = generate_queries(&r);
        assert_eq!(a, b);
        let mut dedup = a.clone();
        dedup.dedup();
        assert_eq!(a.len(), dedup.len());
        assert!(a.iter().all(|s| !s.trim().is_empty()));
    }
}
