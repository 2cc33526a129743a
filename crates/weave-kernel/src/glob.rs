//! Simplified glob matching for file names.
//!
//! - `*` matches zero or more characters
//! - `?` matches exactly one character
//!
//! Every other character matches itself. Matching is case-sensitive and
//! anchored at both ends.

/// Match a name against a glob pattern.
///
/// Uses single-star backtracking, so the cost is bounded by
/// `pattern.len() * input.len()` regardless of how many stars appear.
///
/// ```
/// use weave_kernel::glob::glob_match;
///
/// assert!(glob_match("*.txt", "notes.txt"));
/// assert!(glob_match("file?.md", "file1.md"));
/// assert!(!glob_match("*.txt", "notes.md"));
/// ```
pub fn glob_match(pattern: &str, input: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let input: Vec<char> = input.chars().collect();

    let (mut pi, mut ii) = (0, 0);
    // Position of the last `*` seen, and the input index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while ii < input.len() {
        match pattern.get(pi) {
            Some('*') => {
                backtrack = Some((pi, ii));
                pi += 1;
            }
            Some('?') => {
                pi += 1;
                ii += 1;
            }
            Some(&c) if c == input[ii] => {
                pi += 1;
                ii += 1;
            }
            _ => match backtrack {
                // Let the last star absorb one more character.
                Some((star_pi, star_ii)) => {
                    pi = star_pi + 1;
                    ii = star_ii + 1;
                    backtrack = Some((star_pi, star_ii + 1));
                }
                None => return false,
            },
        }
    }

    pattern[pi..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_matches() {
        assert!(glob_match("hello", "hello"));
        assert!(glob_match("", ""));
        assert!(!glob_match("hello", "world"));
        assert!(!glob_match("hello", "hell"));
        assert!(!glob_match("hello", "helloo"));
    }

    #[test]
    fn star_wildcard() {
        assert!(glob_match("*", ""));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("*.txt", "x.txt"));
        assert!(glob_match("*.txt", ".txt"));
        assert!(glob_match("a*b*c", "aXXbYYc"));
        assert!(glob_match("**", "deep"));
        assert!(!glob_match("*.txt", "x.md"));
        assert!(!glob_match("a*b", "acd"));
    }

    #[test]
    fn question_wildcard() {
        assert!(glob_match("?", "a"));
        assert!(!glob_match("?", ""));
        assert!(!glob_match("?", "ab"));
        assert!(glob_match("log?.txt", "log1.txt"));
    }

    #[test]
    fn star_backtracks_across_repeats() {
        assert!(glob_match("*a*a*a", "aaaa"));
        assert!(!glob_match("*a*a*a*b", "aaaaaaaaaaaaaaaaaaaaaaaa"));
    }

    #[test]
    fn case_sensitive() {
        assert!(!glob_match("*.TXT", "a.txt"));
    }
}
