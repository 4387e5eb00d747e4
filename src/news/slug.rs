use lazy_static::lazy_static;
use regex::Regex;

/// URL-friendly slug: lower-case, every run of non-alphanumerics collapsed to
/// one hyphen, leading/trailing hyphens trimmed.
pub fn slugify(title: &str) -> String {
    lazy_static! {
        static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }
    let lower = title.to_lowercase();
    NON_ALNUM
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Candidate sequence used to resolve slug collisions: the base slug, then
/// `base-1`, `base-2`, …
pub fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string()).chain((1u32..).map(move |n| format!("{base}-{n}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("My Recipe!"), "my-recipe");
    }

    #[test]
    fn slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("  Hello --- World?! "), "hello-world");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("Top 10 Tips"), "top-10-tips");
    }

    #[test]
    fn candidate_sequence() {
        let mut c = candidates("my-recipe");
        assert_eq!(c.next().unwrap(), "my-recipe");
        assert_eq!(c.next().unwrap(), "my-recipe-1");
        assert_eq!(c.next().unwrap(), "my-recipe-2");
    }
}
