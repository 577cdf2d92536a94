//! Parser for free-text residue labels such as `GLU40A` or `SER 12`.
//!
//! The accepted grammar is: one to four uppercase letters (residue name),
//! optional whitespace, an optional signed integer (residue number), then an
//! optional single letter (chain) which is only allowed after a number.
//! Leading and trailing whitespace is ignored; anything else makes the text
//! unparseable.

/// Longest residue name accepted by [`parse_residue_label`].
const MAX_NAME_LEN: usize = 4;

/// The pieces of a successfully parsed residue label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelParts<'a> {
    /// Residue name, e.g. `GLU`
    pub name: &'a str,
    /// Residue number as written, including a leading `-` if present
    pub number: Option<&'a str>,
    /// Chain identifier
    pub chain: Option<char>,
}

/// Decompose a residue label into name, number and chain.
///
/// Returns `None` when the text does not follow the label grammar.
pub fn parse_residue_label(text: &str) -> Option<LabelParts<'_>> {
    let text = text.trim();

    let name_len = text.bytes().take_while(|b| b.is_ascii_uppercase()).count();
    if name_len == 0 || name_len > MAX_NAME_LEN {
        return None;
    }
    let (name, rest) = text.split_at(name_len);
    let rest = rest.trim_start();

    let sign = usize::from(rest.starts_with('-'));
    let digits = rest[sign..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        // Bare residue name, e.g. `HOH`
        return rest.is_empty().then_some(LabelParts {
            name,
            number: None,
            chain: None,
        });
    }
    let (number, rest) = rest.split_at(sign + digits);

    let mut tail = rest.trim_start().chars();
    let chain = match (tail.next(), tail.next()) {
        (None, _) => None,
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => return None,
    };

    Some(LabelParts {
        name,
        number: Some(number),
        chain,
    })
}

/// Return the first signed integer embedded in `text`.
///
/// `A123B` yields 123 and `X-5Y7` yields -5. Values that do not fit in an
/// `i64` are treated as absent.
pub fn first_signed_integer(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let first_digit = bytes.iter().position(u8::is_ascii_digit)?;
    let start = match first_digit {
        0 => 0,
        i if bytes[i - 1] == b'-' => i - 1,
        i => i,
    };
    let end = first_digit
        + bytes[first_digit..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
    text[start..end].parse().ok()
}
