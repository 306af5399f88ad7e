use crate::config::OptimizationLevel;

use super::rules::{
    AGGRESSIVE_PHRASES, DIRECTIVES, DISCLAIMER_REMOVAL, FILLERS, MILD_PHRASES, MODERATE_PHRASES,
    OPENERS, PLEASANTRY_REMOVAL, POLITE_REQUESTS, RewriteRule, WHITESPACE_RUN,
};

/// Full rule-based optimization at `level`
pub fn optimize(text: &str, level: OptimizationLevel) -> String {
    let normalized = normalize_whitespace(text);
    let rewritten = rewrite_polite(&normalized, level);
    let rewritten = optimize_phrases(&rewritten, level);
    let stripped = strip_low_value(&rewritten, level);
    let stripped = strip_disclaimers(&stripped, level);
    normalize_whitespace(&stripped)
}

/// Conversational tier only: polite requests, directives, fillers and pleasantries
pub fn optimize_conversational(text: &str, level: OptimizationLevel) -> String {
    let normalized = normalize_whitespace(text);
    let rewritten = rewrite_polite(&normalized, level);
    let stripped = strip_low_value(&rewritten, level);
    normalize_whitespace(&stripped)
}

/// Phrase tier only. Whitespace is left as found.
pub fn optimize_phrases(text: &str, level: OptimizationLevel) -> String {
    phrase_rules(level).fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Collapse whitespace runs to one space and trim
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Phrase-tier rules active at `level`, in application order
pub fn phrase_rules(level: OptimizationLevel) -> impl Iterator<Item = &'static RewriteRule> {
    let moderate: &'static [RewriteRule] = if level.includes(OptimizationLevel::Moderate) {
        MODERATE_PHRASES.as_slice()
    } else {
        &[]
    };
    let aggressive: &'static [RewriteRule] = if level.includes(OptimizationLevel::Aggressive) {
        AGGRESSIVE_PHRASES.as_slice()
    } else {
        &[]
    };

    OPENERS
        .iter()
        .chain(MILD_PHRASES.iter())
        .chain(moderate)
        .chain(aggressive)
}

/// Keep the first `ceil(words * ratio)` whitespace-delimited words
pub fn truncate_words(text: &str, ratio: f64) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let keep = ((words.len() as f64) * ratio).ceil() as usize;
    words[..keep.min(words.len())].join(" ")
}

// Phrases containing a filler word must be rewritten before fillers are removed.
fn rewrite_polite(text: &str, level: OptimizationLevel) -> String {
    let mut out = text.to_string();
    if level.includes(OptimizationLevel::Moderate) {
        out = apply_all(&POLITE_REQUESTS, &out);
    }
    if level.includes(OptimizationLevel::Aggressive) {
        out = apply_all(&DIRECTIVES, &out);
    }
    out
}

fn strip_low_value(text: &str, level: OptimizationLevel) -> String {
    let mut out = text.to_string();
    if level.includes(OptimizationLevel::Moderate) {
        out = FILLERS.apply(&out);
    }
    if level.includes(OptimizationLevel::Aggressive) {
        out = PLEASANTRY_REMOVAL.apply(&out);
    }
    out
}

// Part of the phrase tier, deferred until every rewrite has run.
fn strip_disclaimers(text: &str, level: OptimizationLevel) -> String {
    if level.includes(OptimizationLevel::Aggressive) {
        DISCLAIMER_REMOVAL.apply(text)
    } else {
        text.to_string()
    }
}

fn apply_all(rules: &[RewriteRule], text: &str) -> String {
    rules.iter().fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::compress::rules::FILLER_WORDS;

    #[test]
    fn test_end_to_end_aggressive() {
        let input = "I would like you to basically explain  the thing, thanks in advance";
        assert_eq!(
            optimize(input, OptimizationLevel::Aggressive),
            "Please explain the thing,"
        );
    }

    #[test]
    fn test_whitespace_normalization() {
        for level in OptimizationLevel::ALL {
            let out = optimize("  a   b  ", level);
            assert_eq!(out, "a b");
            assert!(!out.contains("  "));
        }
        assert_eq!(optimize("", OptimizationLevel::Aggressive), "");
        assert_eq!(normalize_whitespace("\t one\n\ntwo \r\n"), "one two");
    }

    #[test]
    fn test_mild_keeps_fillers() {
        let out = optimize("I just need this in order to ship", OptimizationLevel::Mild);
        assert_eq!(out, "I just need this to ship");
    }

    #[test]
    fn test_no_fillers_survive() {
        let input = "Basically I actually, literally, REALLY want you to just be very clear, \
                     that is, you know, like a teacher";
        for level in [OptimizationLevel::Moderate, OptimizationLevel::Aggressive] {
            let out = optimize(input, level).to_lowercase();
            let words: Vec<&str> = out
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .collect();
            for filler in FILLER_WORDS.iter().filter(|f| !f.contains(' ')) {
                assert!(!words.contains(filler), "{filler} survived at {level}: {out}");
            }
            assert!(!out.contains("that is"));
            assert!(!out.contains("you know"));
        }
    }

    #[test]
    fn test_moderate_rewrites() {
        let out = optimize(
            "Could you please check this at this point in time",
            OptimizationLevel::Moderate,
        );
        assert_eq!(out, "Please check this now");
    }

    #[test]
    fn test_aggressive_directives_and_disclaimers() {
        assert_eq!(
            optimize("Hello! Can you explain ownership?", OptimizationLevel::Aggressive),
            "! Explain ownership?"
        );
        assert_eq!(
            optimize(
                "I need you to provide a summary. Thank you",
                OptimizationLevel::Aggressive
            ),
            "Provide a summary."
        );
        assert_eq!(
            optimize("As an AI assistant, list three options", OptimizationLevel::Aggressive),
            ", list three options"
        );
    }

    #[test]
    fn test_like_phrase_rewritten_before_filler_removal() {
        assert_eq!(
            optimize(
                "I'd like to know more about lifetimes",
                OptimizationLevel::Aggressive
            ),
            "Explain lifetimes"
        );
    }

    #[test]
    fn test_openers_apply_at_every_level() {
        for level in OptimizationLevel::ALL {
            assert_eq!(
                optimize("I was wondering if you could review this", level),
                "Please review this"
            );
            assert_eq!(
                optimize("I'm writing to you to ask about pricing", level),
                "Regarding pricing"
            );
        }
    }

    #[test]
    fn test_phrase_tier_containment() {
        let mild: Vec<&str> = phrase_rules(OptimizationLevel::Mild)
            .map(|r| r.pattern())
            .collect();
        let moderate: Vec<&str> = phrase_rules(OptimizationLevel::Moderate)
            .map(|r| r.pattern())
            .collect();
        let aggressive: Vec<&str> = phrase_rules(OptimizationLevel::Aggressive)
            .map(|r| r.pattern())
            .collect();

        assert!(mild.iter().all(|p| moderate.contains(p)));
        assert!(moderate.iter().all(|p| aggressive.contains(p)));
        assert!(mild.len() < moderate.len() && moderate.len() < aggressive.len());
    }

    #[test]
    fn test_aggressive_keeps_passive_rules() {
        assert_eq!(
            optimize("The audit was conducted by Sam", OptimizationLevel::Aggressive),
            "The audit conducted Sam"
        );
    }

    #[test]
    fn test_phrases_preserve_whitespace() {
        assert_eq!(
            optimize_phrases("  due to the fact that  ", OptimizationLevel::Mild),
            "  because  "
        );
    }

    #[test]
    fn test_fixed_point() {
        let input = "Could you please, basically, write a parser in order to read TOML. Thanks in advance";
        for level in OptimizationLevel::ALL {
            let once = optimize(input, level);
            assert_eq!(optimize(&once, level), once);
        }
    }

    #[test]
    fn test_conversational_skips_phrase_tier() {
        assert_eq!(
            optimize_conversational("just do it in order to win", OptimizationLevel::Moderate),
            "do it in order to win"
        );
    }

    #[test]
    fn test_conversational_keeps_disclaimers() {
        assert_eq!(
            optimize_conversational(
                "Hello, As an AI language model you help",
                OptimizationLevel::Aggressive
            ),
            ", As an AI language model you help"
        );
    }

    #[test]
    fn test_truncate_words() {
        let ten = "one two three four five six seven eight nine ten";
        assert_eq!(truncate_words(ten, 0.85).split(' ').count(), 9);
        assert_eq!(truncate_words(ten, 0.7).split(' ').count(), 7);
        assert_eq!(truncate_words(ten, 1.0), ten);
        assert_eq!(truncate_words("", 0.7), "");
        assert_eq!(truncate_words("single", 0.7), "single");
    }
}
