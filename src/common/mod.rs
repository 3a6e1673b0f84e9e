pub fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Match a command keyword at the start of `query`.
///
/// The keyword must be followed by whitespace or the end of the input so that
/// `yt` does not swallow queries like `ytdl`. Returns the trimmed remainder.
pub fn strip_keyword_ci<'a>(query: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = strip_prefix_ci(query, keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
