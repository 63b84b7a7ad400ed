use regex::Regex;

/// Returns true if `name` matches any of `patterns`.
///
/// Each pattern is either an exact string or a glob using `*` to match any
/// run of characters. Regex metacharacters other than `*` are escaped so a
/// pattern like `release/1.0` only matches that literal string.
pub fn is_protected(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| pattern_matches(pattern, name))
}

fn pattern_matches(pattern: &str, name: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == name;
    }
    match glob_to_regex(pattern) {
        Some(re) => re.is_match(name),
        None => pattern == name,
    }
}

fn glob_to_regex(pattern: &str) -> Option<Regex> {
    let mut out = String::with_capacity(pattern.len() + 2);
    out.push('^');
    for ch in pattern.chars() {
        if ch == '*' {
            out.push_str(".*");
        } else {
            out.push_str(&regex::escape(&ch.to_string()));
        }
    }
    out.push('$');
    Regex::new(&out).ok()
}
