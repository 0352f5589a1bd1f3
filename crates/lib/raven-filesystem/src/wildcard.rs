/// Replace backslashes by `/`, and optionally make sure a non-empty path ends with `/`.
pub fn standardize_path(path: &str, append_last_slash: bool) -> String {
    let mut path = path.replace('\\', "/");
    if append_last_slash && !path.is_empty() && !path.ends_with('/') {
        path.push('/');
    }
    path
}

/// Split a search pattern into its directory and its file pattern.
///
/// The split happens at the last `/` that comes before the first `*`, so
/// `envs/*/sky.dds` yields `("envs", "*/sky.dds")`. Without any `/` the
/// directory is empty.
pub fn split_with_wildcard(pattern: &str) -> (String, String) {
    let pattern = standardize_path(pattern, false);

    let search = match pattern.find('*') {
        Some(w) => &pattern[..w],
        None => &pattern[..],
    };

    match search.rfind('/') {
        Some(i) => (pattern[..i].to_owned(), pattern[i + 1..].to_owned()),
        None => (String::new(), pattern),
    }
}

/// Match `text` against `pattern`, where `*` stands for any run of characters (`/` included).
pub fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text = text.as_bytes();
    let pattern = pattern.as_bytes();

    let (mut t, mut p) = (0, 0);
    // position of the last star in the pattern and where it started consuming text
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = star {
            // let the last star swallow one more character
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, t));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}
