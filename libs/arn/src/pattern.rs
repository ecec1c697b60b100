//! Wildcard patterns used for ARN superset checks.
//!
//! Only two characters are special: `*` matches any run of characters
//! (including none) and `?` matches exactly one character. Everything else,
//! including regex metacharacters such as `.` or `(`, matches itself. A
//! pattern always has to cover the whole candidate string.

use std::fmt;

use regex::{Regex, RegexBuilder};
use tracing::trace;

use crate::types::Arn;

/// How a compiled pattern decides a match.
#[derive(Debug, Clone)]
enum Matcher {
    /// No wildcards: only an identical string matches.
    Literal,
    /// The escaped expression, anchored at both ends.
    Regex(Regex),
    /// Patterns too large for the regex engine's size limits.
    Glob(Vec<char>),
}

/// A compiled `*`/`?` wildcard pattern.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    expr: String,
    matcher: Matcher,
}

impl WildcardPattern {
    /// Compiles a wildcard string.
    ///
    /// Every input compiles. A pattern the regex engine rejects as too large
    /// is matched by a direct `*`/`?` scan with the same semantics.
    pub fn new(source: &str) -> Self {
        let expr = to_regex(source);

        let matcher = if !has_wildcards(source) {
            Matcher::Literal
        } else {
            trace!(source, expr = %expr, "compiling wildcard pattern");
            match RegexBuilder::new(&format!("^(?:{expr})$"))
                .dot_matches_new_line(true)
                .build()
            {
                Ok(regex) => Matcher::Regex(regex),
                Err(err) => {
                    trace!(error = %err, len = source.len(), "falling back to glob scan");
                    Matcher::Glob(source.chars().collect())
                }
            }
        };

        Self {
            source: source.to_string(),
            expr,
            matcher,
        }
    }

    /// Returns true if the pattern covers all of `candidate`.
    pub fn is_match(&self, candidate: &str) -> bool {
        match &self.matcher {
            Matcher::Literal => self.source == candidate,
            Matcher::Regex(regex) => regex.is_match(candidate),
            Matcher::Glob(pattern) => {
                let candidate: Vec<char> = candidate.chars().collect();
                glob_scan(pattern, &candidate)
            }
        }
    }

    /// The wildcard string this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The unanchored regular expression the wildcards were translated into.
    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Escapes `source` and restores `*` and `?` as wildcards.
fn to_regex(source: &str) -> String {
    regex::escape(source)
        .replace(r"\*", ".*")
        .replace(r"\?", ".")
}

fn has_wildcards(source: &str) -> bool {
    source.contains(&['*', '?'][..])
}

/// Anchored `*`/`?` match without backtracking past the most recent `*`.
fn glob_scan(pattern: &[char], candidate: &[char]) -> bool {
    let (mut p, mut c) = (0, 0);
    // Position of the last `*` seen and the candidate index it currently absorbs up to.
    let mut star: Option<(usize, usize)> = None;

    while c < candidate.len() {
        match pattern.get(p) {
            Some(&'*') => {
                star = Some((p, c));
                p += 1;
            }
            Some(&ch) if ch == '?' || ch == candidate[c] => {
                p += 1;
                c += 1;
            }
            _ => match star {
                Some((star_p, star_c)) => {
                    p = star_p + 1;
                    c = star_c + 1;
                    star = Some((star_p, star_c + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&ch| ch == '*')
}

// =============================================================================
// ARN Pattern
// =============================================================================

/// An ARN whose six slots have been compiled once, for checking many
/// candidates against the same pattern.
///
/// `ArnPattern::new(&a).matches(&b)` gives the same answer as
/// `a.is_superset_of(&b)`.
///
/// ```
/// use arnkit_arn::{Arn, ArnPattern};
///
/// let policy: Arn = "arn:aws:s3:::logs-*/2024/*".parse()?;
/// let pattern = ArnPattern::new(&policy);
///
/// assert!(pattern.matches(&"arn:aws:s3:::logs-app/2024/01/01.gz".parse()?));
/// assert!(!pattern.matches(&"arn:aws:s3:::logs-app/2023/12/31.gz".parse()?));
/// # Ok::<(), arnkit_arn::ArnError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArnPattern {
    arn: Arn,
    slots: Vec<WildcardPattern>,
}

impl ArnPattern {
    /// Compiles every slot of `arn`.
    pub fn new(arn: &Arn) -> Self {
        let slots = arn
            .parts()
            .iter()
            .map(|part| WildcardPattern::new(part))
            .collect();

        Self {
            arn: arn.clone(),
            slots,
        }
    }

    /// The ARN this pattern was compiled from.
    pub fn arn(&self) -> &Arn {
        &self.arn
    }

    /// The compiled slots, in the order of [`Arn::parts`].
    pub fn slots(&self) -> &[WildcardPattern] {
        &self.slots
    }

    /// Returns true if this pattern covers `candidate`.
    pub fn matches(&self, candidate: &Arn) -> bool {
        if self.arn == *candidate {
            return true;
        }

        self.slots
            .iter()
            .zip(candidate.parts().iter())
            .all(|(slot, part)| slot.is_match(part))
    }
}

impl fmt::Display for ArnPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.arn, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn arn(s: &str) -> Arn {
        Arn::parse(s).unwrap()
    }

    #[rstest]
    #[case("foo-bar/main.dir/*", r"foo\-bar/main\.dir/.*")]
    #[case("foo-bar/main.dir/?", r"foo\-bar/main\.dir/.")]
    #[case("?/foo-bar/?/*", r"./foo\-bar/./.*")]
    #[case("foo-bar/?/(main.dir/*", r"foo\-bar/./\(main\.dir/.*")]
    #[case(r"a\*b", r"a\\.*b")]
    fn test_to_regex(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(WildcardPattern::new(input).as_str(), expected);
    }

    #[test]
    fn test_literal_dot() {
        let pattern = WildcardPattern::new("foo-bar/main.dir/*");
        assert!(pattern.is_match("foo-bar/main.dir/anything"));
        assert!(!pattern.is_match("foo-barXmain.dir/anything"));
        assert!(!pattern.is_match("foo-bar/mainXdir/anything"));
    }

    #[test]
    fn test_match_is_anchored() {
        let pattern = WildcardPattern::new("bucket");
        assert!(pattern.is_match("bucket"));
        assert!(!pattern.is_match("my-bucket"));
        assert!(!pattern.is_match("bucket/key"));
    }

    #[test]
    fn test_star_matches_empty_and_newlines() {
        let pattern = WildcardPattern::new("a*b");
        assert!(pattern.is_match("ab"));
        assert!(pattern.is_match("a\nb"));
        assert!(pattern.is_match("a:x/y:b"));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        let pattern = WildcardPattern::new("b?");
        assert!(pattern.is_match("bk"));
        assert!(pattern.is_match("bé"));
        assert!(!pattern.is_match("b"));
        assert!(!pattern.is_match("bkk"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = WildcardPattern::new("a+b|c[0-9]{2}$^");
        assert!(pattern.is_match("a+b|c[0-9]{2}$^"));
        assert!(!pattern.is_match("aab"));
        assert!(!pattern.is_match("c"));
    }

    #[test]
    fn test_display_shows_source() {
        let pattern = WildcardPattern::new("logs-*");
        assert_eq!(pattern.to_string(), "logs-*");
        assert_eq!(pattern.source(), "logs-*");
    }

    const COMPANY: &str =
        "arn:aws:s3:::service.dcname-platform-environment.us-west-2.company";
    const COMPANY_OBJECTS: &str = "arn:aws:s3:::service.dcname-platform-environment.us-west-2.company/mesos-dcname-platform-environment/*";

    #[rstest]
    #[case(COMPANY, COMPANY, true, true)]
    #[case(COMPANY, COMPANY_OBJECTS, false, false)]
    #[case(
        "arn:aws:s3:::service.dcname-platform-environment.us-west-2.*",
        COMPANY_OBJECTS,
        true,
        false
    )]
    #[case(
        "arn:aws:s3:::service.dcname-platform-environment.us-west-2.???????",
        COMPANY_OBJECTS,
        false,
        false
    )]
    #[case(
        "arn:aws:s3:::service.dcname-platform-environment.us-west-2.???????/*",
        COMPANY_OBJECTS,
        true,
        false
    )]
    #[case(
        "arn:aws:s3:::service.dcname-platform-environment.us-west-2.company:*/*",
        COMPANY_OBJECTS,
        false,
        false
    )]
    #[case(
        "arn:aws:s3:::service.dcname-platform-environment.us-west-2.company/*/*",
        COMPANY_OBJECTS,
        true,
        false
    )]
    #[case(
        "arn:aws:s3:::service.dcname-platform-environment.us-west-2.company:mesos-dcname-platform-environment/*",
        COMPANY_OBJECTS,
        false,
        false
    )]
    #[case(
        "arn:aws:s3:::service1.dcname-platform-environment.us-west-2.company",
        "arn:aws:s3:::service2.dcname-platform-environment.us-west-2.company",
        false,
        false
    )]
    #[case(
        "arn:aws:s3:::service1.dcname-platform-environment.us-west-2.company",
        "arn:aws:s3:::service2.dcname-platform-environment.us-west-2.company/mesos-dcname-platform-environment/*",
        false,
        false
    )]
    #[case(
        "arn:aws:s3:::bucket.name.*",
        "arn:aws:s3:::bucket.name.company/path/*",
        true,
        false
    )]
    fn test_superset(
        #[case] a: &str,
        #[case] b: &str,
        #[case] a_superset_of_b: bool,
        #[case] b_superset_of_a: bool,
    ) {
        let (a, b) = (arn(a), arn(b));
        assert_eq!(a.is_superset_of(&b), a_superset_of_b, "a = {a}, b = {b}");
        assert_eq!(b.is_superset_of(&a), b_superset_of_a, "b = {b}, a = {a}");
    }

    #[test]
    fn test_colon_pattern_does_not_cover_slash_candidate() {
        let pattern = arn("arn:aws:s3:::company:*/*");
        let candidate = arn("arn:aws:s3:::company/mesos-x/*");
        assert!(!pattern.is_superset_of(&candidate));
    }

    #[test]
    fn test_wildcard_spans_resource_delimiter() {
        let pattern = arn("arn:aws:iam::123456789012:user*");
        let candidate = arn("arn:aws:iam::123456789012:user/alice");
        assert_eq!(pattern.resource_type(), "");
        assert_eq!(candidate.resource_type(), "user");
        assert!(pattern.is_superset_of(&candidate));
    }

    #[test]
    fn test_prefix_field_wildcards() {
        let pattern = arn("arn:aws*:s3:*:*:bucket");
        assert!(pattern.is_superset_of(&arn("arn:aws-cn:s3:::bucket")));
        assert!(pattern.is_superset_of(&arn("arn:aws:s3:eu-west-1:123:bucket")));
        assert!(!pattern.is_superset_of(&arn("arn:gov:s3:::bucket")));
        assert!(!pattern.is_superset_of(&arn("arn:aws:sqs:::bucket")));
    }

    #[test]
    fn test_empty_slot_only_matches_empty() {
        let pattern = arn("arn:aws:s3:::bucket");
        assert!(!pattern.is_superset_of(&arn("arn:aws:s3:us-east-1::bucket")));
        assert!(arn("arn:aws:s3:*::bucket").is_superset_of(&pattern));
    }

    #[test]
    fn test_superset_not_assumed_transitive_but_holds_for_nested_globs() {
        let wide = arn("arn:aws:s3:::logs-*");
        let narrow = arn("arn:aws:s3:::logs-app/*");
        let object = arn("arn:aws:s3:::logs-app/2024/01.gz");
        assert!(wide.is_superset_of(&narrow));
        assert!(narrow.is_superset_of(&object));
        assert!(wide.is_superset_of(&object));
    }

    #[test]
    fn test_superset_chain_can_break_transitivity() {
        // `?` covers a literal `*`, which in turn stands for longer strings.
        let single = arn("arn:aws:s3:::b?");
        let star = arn("arn:aws:s3:::b*");
        let long = arn("arn:aws:s3:::bucket");
        assert!(single.is_superset_of(&star));
        assert!(star.is_superset_of(&long));
        assert!(!single.is_superset_of(&long));
    }

    #[test]
    fn test_arn_pattern_agrees_with_superset() {
        let policy = arn("arn:aws:s3:::service.*.us-west-2.???????/*");
        let pattern = ArnPattern::new(&policy);
        assert_eq!(pattern.arn(), &policy);
        assert_eq!(pattern.slots().len(), 6);
        assert_eq!(pattern.to_string(), policy.to_string());

        for candidate in [COMPANY, COMPANY_OBJECTS, "arn:aws:s3:::service.x.us-west-2.company/k"] {
            let candidate = arn(candidate);
            assert_eq!(pattern.matches(&candidate), policy.is_superset_of(&candidate));
        }
    }

    #[test]
    fn test_literal_slot_skips_regex() {
        let pattern = WildcardPattern::new("a.b");
        assert!(matches!(pattern.matcher, Matcher::Literal));
        assert!(pattern.is_match("a.b"));
        assert!(!pattern.is_match("axb"));
        assert!(WildcardPattern::new("").is_match(""));
        assert!(!WildcardPattern::new("").is_match("x"));
    }

    #[test]
    fn test_oversized_wildcard_pattern_still_matches() {
        let glob = "a*".repeat(20_000);
        assert!(matches!(WildcardPattern::new(&glob).matcher, Matcher::Glob(_)));

        let pattern = arn(&format!("arn:aws:s3:::{glob}"));
        let candidate = arn(&format!("arn:aws:s3:::{}", "ab".repeat(20_000)));
        let mismatch = arn(&format!("arn:aws:s3:::b{}", "ab".repeat(20_000)));

        assert!(pattern.is_superset_of(&candidate));
        assert!(!pattern.is_superset_of(&mismatch));

        let compiled = ArnPattern::new(&pattern);
        assert!(compiled.matches(&candidate));
        assert!(!compiled.matches(&mismatch));
    }

    #[test]
    fn test_long_literal_slot_in_arn_pattern() {
        let bucket = "x".repeat(1_000_000);
        let pattern = arn(&format!("arn:aws:s3:*::{bucket}"));
        let candidate = arn(&format!("arn:aws:s3:us-east-1::{bucket}"));

        assert!(pattern.is_superset_of(&candidate));
        assert!(ArnPattern::new(&pattern).matches(&candidate));
    }

    #[rstest]
    #[case("*", "", true)]
    #[case("a*", "abc", true)]
    #[case("*c", "abc", true)]
    #[case("a*b*c", "aXbYbZc", true)]
    #[case("a?c", "abc", true)]
    #[case("a?c", "ac", false)]
    #[case("a*d", "abc", false)]
    #[case("ab", "abc", false)]
    fn test_glob_scan(#[case] pattern: &str, #[case] candidate: &str, #[case] expected: bool) {
        let pattern: Vec<char> = pattern.chars().collect();
        let candidate: Vec<char> = candidate.chars().collect();
        assert_eq!(glob_scan(&pattern, &candidate), expected);
    }

    proptest! {
        #[test]
        fn prop_every_slot_matches_itself(slot in "[a-z0-9:/.*?()+|-]{0,16}") {
            let pattern = WildcardPattern::new(&slot);
            prop_assert!(pattern.is_match(&slot));
        }

        #[test]
        fn prop_literal_pattern_is_equality(
            pattern in "[a-z0-9:/.()+|-]{0,8}",
            candidate in "[a-z0-9:/.()+|-]{0,8}",
        ) {
            let compiled = WildcardPattern::new(&pattern);
            prop_assert_eq!(compiled.is_match(&candidate), pattern == candidate);
        }

        #[test]
        fn prop_glob_scan_agrees_with_regex(
            pattern in "[ab*?]{0,8}",
            candidate in "[ab]{0,8}",
        ) {
            let compiled = WildcardPattern::new(&pattern);
            let pattern: Vec<char> = pattern.chars().collect();
            let chars: Vec<char> = candidate.chars().collect();
            prop_assert_eq!(glob_scan(&pattern, &chars), compiled.is_match(&candidate));
        }

        #[test]
        fn prop_arn_pattern_reflexive(
            prefix in proptest::collection::vec("[a-z*?-]{0,4}", 5),
            suffix in "[a-z:/*?-]{0,10}",
        ) {
            let a = arn(&format!("{}:{}", prefix.join(":"), suffix));
            prop_assert!(ArnPattern::new(&a).matches(&a));
        }
    }
}
