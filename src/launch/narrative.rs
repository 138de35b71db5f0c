//! Deterministic, table-driven explanation text for a launch-potential result.

use super::pillars::{Factors, Level};
use super::verdict::Tier;

pub const JEWELRY_WARNING: &str = "Generic jewelry is one of the most saturated markets online; without personalization or a clear niche angle this product is unlikely to stand out.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    /// 1–3 sentences: optional warning, tier headline, pillar drivers.
    pub explanation: String,
    /// Exactly 4 sentences: summary, strengths, challenges, recommendation.
    pub score_justification: String,
    pub warning: Option<&'static str>,
}

fn headline(tier: Tier) -> &'static str {
    match tier {
        Tier::Saturated => "This market looks saturated for this product.",
        Tier::Competitive => "This market is competitive but open to a differentiated launch.",
        Tier::Favorable => "This market shows a favorable opening for a launch.",
    }
}

fn recommendation(tier: Tier) -> &'static str {
    match tier {
        Tier::Saturated => {
            "Rework the concept with personalization or a narrower audience before investing in a launch."
        }
        Tier::Competitive => {
            "Launch only with a clear differentiation strategy built on targeted keywords and a defined audience."
        }
        Tier::Favorable => {
            "Move quickly to validate demand and secure visibility while competition remains light."
        }
    }
}

fn density_phrase(level: Level) -> &'static str {
    match level {
        Level::Low => "light search competition",
        Level::Medium => "moderate search competition",
        Level::High => "heavy search competition",
    }
}

fn saturation_phrase(level: Level) -> &'static str {
    match level {
        Level::Low => "a structurally open niche",
        Level::Medium => "a moderately saturated niche",
        Level::High => "a structurally saturated niche",
    }
}

fn specificity_phrase(level: Level) -> &'static str {
    match level {
        Level::Low => "a generic product angle",
        Level::Medium => "a somewhat distinctive product angle",
        Level::High => "a highly specific product angle",
    }
}

/// Pillar phrases in fixed order, split into (strengths, challenges).
fn strengths_and_challenges(f: &Factors) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut strengths = Vec::new();
    let mut challenges = Vec::new();

    match f.competition_density {
        Level::Low => strengths.push(density_phrase(Level::Low)),
        Level::High => challenges.push(density_phrase(Level::High)),
        Level::Medium => {}
    }
    match f.niche_saturation {
        Level::Low => strengths.push(saturation_phrase(Level::Low)),
        Level::High => challenges.push(saturation_phrase(Level::High)),
        Level::Medium => {}
    }
    match f.product_specificity {
        Level::High => strengths.push(specificity_phrase(Level::High)),
        Level::Low => challenges.push(specificity_phrase(Level::Low)),
        Level::Medium => {}
    }
    (strengths, challenges)
}

/// "a", "a and b", "a, b and c".
fn join_phrases(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => (*one).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn compose(score: f64, tier: Tier, factors: &Factors, override_applied: bool) -> Narrative {
    let warning = override_applied.then_some(JEWELRY_WARNING);

    let drivers = format!(
        "{}.",
        capitalize(&join_phrases(&[
            density_phrase(factors.competition_density),
            saturation_phrase(factors.niche_saturation),
            specificity_phrase(factors.product_specificity),
        ]))
    );

    let mut explanation = Vec::with_capacity(3);
    if let Some(w) = warning {
        explanation.push(w.to_string());
    }
    explanation.push(headline(tier).to_string());
    explanation.push(format!("Key factors: {drivers}"));

    let (strengths, challenges) = strengths_and_challenges(factors);
    let strengths = if strengths.is_empty() {
        "No pillar stands out as a clear strength.".to_string()
    } else {
        format!("Strengths: {}.", join_phrases(&strengths))
    };
    let challenges = if challenges.is_empty() {
        "No major structural obstacle was detected.".to_string()
    } else {
        format!("Challenges: {}.", join_phrases(&challenges))
    };

    let justification = [
        format!(
            "Launch potential is {:.1}/10, placing this product in the {} tier ({}).",
            score,
            tier.as_str(),
            tier.verdict()
        ),
        strengths,
        challenges,
        recommendation(tier).to_string(),
    ];

    Narrative {
        explanation: explanation.join(" "),
        score_justification: justification.join(" "),
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(d: Level, s: Level, p: Level) -> Factors {
        Factors {
            competition_density: d,
            niche_saturation: s,
            product_specificity: p,
        }
    }

    fn sentence_count(s: &str) -> usize {
        s.matches(". ").count() + usize::from(s.ends_with('.'))
    }

    #[test]
    fn warning_prefixes_explanation() {
        let n = compose(
            2.0,
            Tier::Saturated,
            &factors(Level::Medium, Level::High, Level::Low),
            true,
        );
        assert!(n.explanation.starts_with(JEWELRY_WARNING));
        assert_eq!(n.warning, Some(JEWELRY_WARNING));
    }

    #[test]
    fn explanation_names_all_pillars() {
        let n = compose(
            6.0,
            Tier::Competitive,
            &factors(Level::Low, Level::High, Level::High),
            false,
        );
        assert_eq!(
            n.explanation,
            "This market is competitive but open to a differentiated launch. Key factors: Light search competition, a structurally saturated niche and a highly specific product angle."
        );
        assert!(n.warning.is_none());
    }

    #[test]
    fn justification_has_four_sentences() {
        for (d, s, p) in [
            (Level::Low, Level::Low, Level::High),
            (Level::Medium, Level::Medium, Level::Medium),
            (Level::High, Level::High, Level::Low),
        ] {
            let n = compose(5.0, Tier::Competitive, &factors(d, s, p), false);
            assert_eq!(sentence_count(&n.score_justification), 4, "{}", n.score_justification);
        }
    }

    #[test]
    fn strengths_and_challenges_are_listed() {
        let n = compose(
            9.8,
            Tier::Favorable,
            &factors(Level::Low, Level::Low, Level::High),
            false,
        );
        assert!(n.score_justification.starts_with("Launch potential is 9.8/10"));
        assert!(n.score_justification.contains(
            "Strengths: light search competition, a structurally open niche and a highly specific product angle."
        ));
        assert!(n
            .score_justification
            .contains("No major structural obstacle was detected."));

        let n = compose(
            0.2,
            Tier::Saturated,
            &factors(Level::High, Level::High, Level::Low),
            false,
        );
        assert!(n
            .score_justification
            .contains("No pillar stands out as a clear strength."));
        assert!(n.score_justification.contains("Challenges: heavy search competition"));
    }

    #[test]
    fn identical_inputs_give_identical_text() {
        let f = factors(Level::Medium, Level::Low, Level::Medium);
        assert_eq!(
            compose(6.5, Tier::Competitive, &f, false),
            compose(6.5, Tier::Competitive, &f, false)
        );
    }
}
