//! Display text sanitization.
//!
//! Removes every character outside a fixed allow-list so stray encoding
//! artifacts never reach the presentation layer. The allow-list is ASCII
//! letters and digits, whitespace, and `. , ! ? ; : ( ) & $ % ' " ^ @ # = -`.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^a-zA-Z0-9\s.,!?;:()&$%'"^@#=\-]"#).expect("static pattern is valid")
});

/// Strip disallowed characters. Idempotent.
pub fn sanitize_display(text: &str) -> String {
    DISALLOWED.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_allowed_punctuation() {
        let s = r#"Intro (Part 1): "Data" & $100% off! Q? a;b @#=^-'."#;
        assert_eq!(sanitize_display(s), s);
    }

    #[test]
    fn test_strips_disallowed() {
        assert_eq!(sanitize_display("C++ / Java_8 [beta]"), "C  Java8 beta");
        assert_eq!(sanitize_display("Caf\u{e9} \u{2013} Basics"), "Caf  Basics");
        assert_eq!(sanitize_display("a*b+c~d`e|f"), "abcdef");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "plain",
            "\u{fffd}\u{fffd}Broken\u{2019}s text\u{2122}",
            "tabs\tand\nnewlines {braces} <tags>",
            r#"!@#$%^&*()_+-=[]{}|;':",./<>?"#,
        ];
        for s in inputs {
            let once = sanitize_display(s);
            assert_eq!(sanitize_display(&once), once, "not idempotent for {:?}", s);
        }
    }
}
