//! HTML entity decoding for trivia API text.

/// Longest entity body we try to match, `&` and `;` excluded.
const MAX_ENTITY_LEN: usize = 10;

/// Decode named and numeric HTML entities.
///
/// Unknown or malformed entities are left untouched.
pub fn decode_html_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];

        let decoded = tail
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|(_, c)| *c == ';')
            .and_then(|(end, _)| decode_entity(&tail[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "shy" => '\u{ad}',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "deg" => '°',
        "pi" => 'π',
        "sup2" => '²',
        "sup3" => '³',
        "times" => '×',
        "divide" => '÷',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "euro" => '€',
        "pound" => '£',
        "yen" => '¥',
        "aacute" => 'á',
        "Aacute" => 'Á',
        "agrave" => 'à',
        "acirc" => 'â',
        "atilde" => 'ã',
        "auml" => 'ä',
        "Auml" => 'Ä',
        "aring" => 'å',
        "Aring" => 'Å',
        "aelig" => 'æ',
        "ccedil" => 'ç',
        "Ccedil" => 'Ç',
        "eacute" => 'é',
        "Eacute" => 'É',
        "egrave" => 'è',
        "ecirc" => 'ê',
        "euml" => 'ë',
        "iacute" => 'í',
        "Iacute" => 'Í',
        "igrave" => 'ì',
        "icirc" => 'î',
        "iuml" => 'ï',
        "ntilde" => 'ñ',
        "Ntilde" => 'Ñ',
        "oacute" => 'ó',
        "Oacute" => 'Ó',
        "ograve" => 'ò',
        "ocirc" => 'ô',
        "otilde" => 'õ',
        "ouml" => 'ö',
        "Ouml" => 'Ö',
        "oslash" => 'ø',
        "Oslash" => 'Ø',
        "szlig" => 'ß',
        "uacute" => 'ú',
        "Uacute" => 'Ú',
        "ugrave" => 'ù',
        "ucirc" => 'û',
        "uuml" => 'ü',
        "Uuml" => 'Ü',
        "yacute" => 'ý',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_common_entities() {
        assert_eq!(
            decode_html_entities("Which is &quot;The Red Planet&quot;?"),
            "Which is \"The Red Planet\"?"
        );
        assert_eq!(decode_html_entities("Rock &amp; Roll"), "Rock & Roll");
        assert_eq!(decode_html_entities("It&#039;s"), "It's");
        assert_eq!(decode_html_entities("Pok&eacute;mon"), "Pokémon");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_html_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_html_entities("&#8220;hi&#8221;"), "“hi”");
    }

    #[test]
    fn test_leaves_unknown_and_bare_ampersands() {
        assert_eq!(decode_html_entities("AT&T"), "AT&T");
        assert_eq!(decode_html_entities("a & b"), "a & b");
        assert_eq!(decode_html_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_html_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
    }

    #[test]
    fn test_decodes_only_once() {
        assert_eq!(decode_html_entities("&amp;quot;"), "&quot;");
    }

    #[test]
    fn test_no_entities_is_identity() {
        let text = "What is 2 + 2?";
        assert_eq!(decode_html_entities(text), text);
    }
}
