/// Turns a title into a URL slug.
///
/// Letters and digits are kept (lowercased, accents included), every run of
/// whitespace, `-` or `_` becomes a single hyphen, and everything else is
/// dropped. Leading and trailing hyphens are trimmed.
///
/// # Examples
///
/// ```
/// use carnet_core::slugify;
///
/// assert_eq!(slugify("Trois jours à Lisbonne !"), "trois-jours-à-lisbonne");
/// assert_eq!(slugify("  Porto -- Vila Nova  "), "porto-vila-nova");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_accented_letters() {
        assert_eq!(slugify("Été à Séville"), "été-à-séville");
    }

    #[test]
    fn drops_punctuation_without_splitting() {
        assert_eq!(slugify("L'Alentejo, enfin"), "lalentejo-enfin");
    }

    #[test]
    fn empty_and_symbol_only_titles() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!?"), "");
    }

    #[test]
    fn underscores_become_hyphens() {
        assert_eq!(slugify("jour_01 bis"), "jour-01-bis");
    }
}
