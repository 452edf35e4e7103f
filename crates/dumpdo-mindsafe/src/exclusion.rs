//! Benign-idiom exclusion filter.
//!
//! Literal keyword matching on an emotionally expressive register produces
//! high false-positive rates on PT-BR idioms ("morrendo de rir", "matar o
//! tempo", "cortar o cabelo"). These are checked once, before any severity
//! tier, and a hit unconditionally overrides every other detection for the
//! message.

use regex::Regex;
use std::sync::OnceLock;

/// Figurative uses of morrer/matar/sangue/cortar. Ordered; first match wins.
const EXCLUSION_SOURCES: &[&str] = &[
    r"morrer de (rir|vontade|vergonha|medo|fome|sede|calor|frio|sono|t[eé]dio|curiosidade)",
    r"morrendo de (rir|vontade|vergonha|medo|fome|sede|calor|frio|sono|t[eé]dio)",
    r"me mata(ndo)? de (rir|vergonha|trabalhar|estudar)",
    r"matar (a )?saudade",
    r"matar (a )?fome",
    r"matar (o )?tempo",
    r"matar (a )?vontade",
    r"matei (a )?aula",
    r"sangue (doce|frio|quente|bom)",
    r"sangue nos olhos",
    r"cortar (o )?cabelo",
    r"cortar (o )?mal pela raiz",
    r"cortar (o )?barato",
    r"cortar rela[cç][oõ]es",
];

fn exclusion_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        EXCLUSION_SOURCES
            .iter()
            .map(|src| Regex::new(&format!("(?i){src}")).expect("invalid exclusion pattern"))
            .collect()
    })
}

/// True if the normalized message matches a known benign idiom.
/// Checked against both the given text and its accent-folded form.
pub fn is_excluded(normalized: &str, folded: &str) -> bool {
    exclusion_patterns()
        .iter()
        .any(|p| p.is_match(normalized) || p.is_match(folded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{fold_accents, normalize};

    fn excluded(msg: &str) -> bool {
        let norm = normalize(msg);
        let folded = fold_accents(&norm);
        is_excluded(&norm, &folded)
    }

    #[test]
    fn test_dying_of_laughter_is_excluded() {
        assert!(excluded("morrendo de rir desse meme"));
        assert!(excluded("to morrendo de rir"));
        assert!(excluded("vou morrer de vergonha amanhã"));
    }

    #[test]
    fn test_killing_time_is_excluded() {
        assert!(excluded("fiquei matando o tempo no aeroporto"));
        assert!(excluded("queria matar a saudade dos meus pais"));
    }

    #[test]
    fn test_haircut_is_excluded() {
        assert!(excluded("preciso cortar o cabelo essa semana"));
    }

    #[test]
    fn test_folded_form_also_matches() {
        // typed without the cedilla/tilde
        assert!(excluded("vou cortar relacoes com ele"));
    }

    #[test]
    fn test_genuine_crisis_is_not_excluded() {
        assert!(!excluded("quero morrer"));
        assert!(!excluded("vou me cortar de novo"));
        assert!(!excluded("não aguento mais"));
    }
}
