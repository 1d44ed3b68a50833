//! Glob Pattern Matching
//!
//! Minimal matcher for the store's scan patterns: `*` matches any run of
//! characters (including empty), `?` matches exactly one.

// == Glob Match ==
/// Returns true when `text` matches `pattern`.
///
/// Iterative two-pointer match with backtracking to the last `*`, so long
/// patterns cannot blow the stack.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();

    let mut p = 0;
    let mut t = 0;
    let mut star: Option<usize> = None;
    let mut star_t = 0;

    while t < txt.len() {
        if p < pat.len() && (pat[p] == '?' || pat[p] == txt[t]) {
            p += 1;
            t += 1;
        } else if p < pat.len() && pat[p] == '*' {
            // Remember the star; first try matching it against nothing
            star = Some(p);
            star_t = t;
            p += 1;
        } else if let Some(s) = star {
            // Backtrack: let the last star absorb one more character
            star_t += 1;
            p = s + 1;
            t = star_t;
        } else {
            return false;
        }
    }

    // Only trailing stars may remain in the pattern
    while p < pat.len() && pat[p] == '*' {
        p += 1;
    }
    p == pat.len()
}
