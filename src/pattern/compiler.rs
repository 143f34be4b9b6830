//! printf format-string to regex compilation.
//!
//! Each recognized conversion specifier is replaced by a fragment that
//! matches whatever text that specifier would have rendered at runtime;
//! everything between specifiers is escaped verbatim. The result matches
//! the log line a `printf`-family call actually produced.

/// Specifier-to-fragment table, longest token first.
///
/// Lookup walks this table in order with a prefix match, so a longer
/// specifier must come before every specifier that is a prefix of it;
/// otherwise `%lld` would be consumed as `%l` plus literal text.
const SPECIFIER_FRAGMENTS: &[(&str, &str)] = &[
    // long long
    ("%lld", r"-?\d+"),
    ("%lli", r"-?\d+"),
    ("%llu", r"\d+"),
    ("%llx", "[0-9a-fA-F]+"),
    ("%llX", "[0-9a-fA-F]+"),
    // char/byte width
    ("%hhd", r"-?\d+"),
    ("%hhi", r"-?\d+"),
    ("%hhu", r"\d+"),
    ("%hhx", "[0-9a-fA-F]+"),
    ("%hhX", "[0-9a-fA-F]+"),
    // long
    ("%ld", r"-?\d+"),
    ("%li", r"-?\d+"),
    ("%lu", r"\d+"),
    ("%lx", "[0-9a-fA-F]+"),
    ("%lX", "[0-9a-fA-F]+"),
    ("%lf", r"-?\d+(?:\.\d+)?"),
    // short
    ("%hd", r"-?\d+"),
    ("%hi", r"-?\d+"),
    ("%hu", r"\d+"),
    ("%hx", "[0-9a-fA-F]+"),
    ("%hX", "[0-9a-fA-F]+"),
    // size_t
    ("%zu", r"\d+"),
    // int
    ("%d", r"-?\d+"),
    ("%i", r"-?\d+"),
    ("%u", r"\d+"),
    ("%x", "[0-9a-fA-F]+"),
    ("%X", "[0-9a-fA-F]+"),
    // float/double
    ("%f", r"-?\d+(?:\.\d+)?"),
    ("%e", r"-?\d+(?:\.\d+)?[eE]-?\d+"),
    ("%E", r"-?\d+(?:\.\d+)?[eE]-?\d+"),
    ("%g", r"-?\d+(?:\.\d+)?"),
    ("%G", r"-?\d+(?:\.\d+)?"),
    // string / char / pointer
    ("%s", ".+?"),
    ("%c", "."),
    ("%p", r"(?:0x[0-9a-fA-F]+|\d+)"),
    // literal percent
    ("%%", "%"),
];

/// Compile a printf-style format string into a regex pattern string.
///
/// Literal segments are regex-escaped; recognized specifiers become their
/// fragments; an unrecognized `%` sequence falls through as escaped
/// literal text, so the rest of the line remains usable as a partial
/// match. No anchors are added - callers decide whether to pin the match
/// to line start or end.
pub fn compile(format: &str) -> String {
    let mut pattern = String::new();
    let mut literal = String::new();
    let mut i = 0usize;
    while i < format.len() {
        let rest = &format[i..];
        let specifier = if rest.starts_with('%') {
            SPECIFIER_FRAGMENTS
                .iter()
                .find(|(token, _)| rest.starts_with(token))
        } else {
            None
        };
        if let Some((token, fragment)) = specifier {
            pattern.push_str(&regex::escape(&literal));
            literal.clear();
            pattern.push_str(fragment);
            i += token.len();
        } else if let Some(ch) = rest.chars().next() {
            literal.push(ch);
            i += ch.len_utf8();
        } else {
            break;
        }
    }
    pattern.push_str(&regex::escape(&literal));
    pattern
}
