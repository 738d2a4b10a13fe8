use deunicode::deunicode_char;
use pdfpreview_application::Transliterator;

const UNKNOWN_CHARACTER: char = '?';

/// Folds text to ASCII through `deunicode`, after language specific spellings
/// such as German umlauts. Characters with no known replacement become `?`.
#[derive(Debug, Default)]
pub struct AsciiTransliterator;

impl Transliterator for AsciiTransliterator {
    fn transliterate(&self, text: &str, langcode: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii() {
                out.push(c);
            } else if let Some(replacement) =
                language_override(c, langcode).or_else(|| deunicode_char(c))
            {
                out.push_str(replacement);
            } else {
                out.push(UNKNOWN_CHARACTER);
            }
        }
        out
    }
}

fn language_override(c: char, langcode: &str) -> Option<&'static str> {
    let primary = langcode.split(['-', '_']).next().unwrap_or_default();
    match (primary, c) {
        ("de", 'ä') => Some("ae"),
        ("de", 'ö') => Some("oe"),
        ("de", 'ü') => Some("ue"),
        ("de", 'Ä') => Some("Ae"),
        ("de", 'Ö') => Some("Oe"),
        ("de", 'Ü') => Some("Ue"),
        ("da" | "nb" | "nn" | "no", 'å') => Some("aa"),
        ("da" | "nb" | "nn" | "no", 'Å') => Some("Aa"),
        ("da" | "nb" | "nn" | "no", 'ø') => Some("oe"),
        ("da" | "nb" | "nn" | "no", 'Ø') => Some("Oe"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(AsciiTransliterator.transliterate("Report 2024", "en"), "Report 2024");
    }

    #[test]
    fn diacritics_are_folded() {
        assert_eq!(
            AsciiTransliterator.transliterate("Café Señor Łódź", "en"),
            "Cafe Senor Lodz"
        );
    }

    #[test]
    fn language_overrides_win() {
        assert_eq!(AsciiTransliterator.transliterate("Übersicht", "de"), "Uebersicht");
        assert_eq!(AsciiTransliterator.transliterate("Übersicht", "en"), "Ubersicht");
        assert_eq!(AsciiTransliterator.transliterate("Ørsted", "da-DK"), "Oersted");
    }

    #[test]
    fn non_latin_scripts_are_romanised() {
        let folded = AsciiTransliterator.transliterate("报告 Доклад", "zh");
        assert!(folded.is_ascii());
        assert!(!folded.contains(UNKNOWN_CHARACTER));
        assert!(folded.contains("Doklad"));
    }

    #[test]
    fn unknown_characters_become_question_marks() {
        assert_eq!(AsciiTransliterator.transliterate("a\u{E000}b", "en"), "a?b");
    }
}
