//! Subject wildcard matching
//!
//! Implements NATS token matching between a concrete publish subject
//! and a stream's wildcard subject. Used by the publish path to refuse
//! subjects the target stream would silently drop.

/// Check whether a concrete subject matches a wildcard subject.
///
/// Both inputs are split on `.` and compared token by token:
/// - a literal token must match exactly
/// - `*` matches exactly one token at its position
/// - `>` as the final pattern token matches one or more remaining tokens
///
/// Token counts must otherwise be equal. Empty inputs never match, and
/// a malformed pattern (`>` before the final position) matches nothing.
/// The function is pure and total; any non-match is `false`.
pub fn do_subjects_match(subject: &str, wildcard: &str) -> bool {
    if subject.is_empty() || wildcard.is_empty() {
        return false;
    }

    let subject_tokens: Vec<&str> = subject.split('.').collect();
    let pattern_tokens: Vec<&str> = wildcard.split('.').collect();

    for (position, token) in pattern_tokens.iter().enumerate() {
        match *token {
            // Tail wildcard: must be final and must consume at least one token
            ">" => {
                return position + 1 == pattern_tokens.len()
                    && subject_tokens.len() > position;
            }
            "*" => {
                if subject_tokens.len() <= position {
                    return false;
                }
            }
            literal => {
                if subject_tokens.get(position) != Some(&literal) {
                    return false;
                }
            }
        }
    }

    subject_tokens.len() == pattern_tokens.len()
}
