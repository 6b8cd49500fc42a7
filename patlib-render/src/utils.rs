use regex::Regex;

/// Slugify a string for use as an anchor ID.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single dash and drops the dash a leading or trailing run
/// would leave behind. Heading ids and TOC links both go through here.
#[must_use]
pub fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut pending_dash = false;

  for c in text.chars().flat_map(char::to_lowercase) {
    if c.is_ascii_lowercase() || c.is_ascii_digit() {
      if pending_dash && !slug.is_empty() {
        slug.push('-');
      }
      pending_dash = false;
      slug.push(c);
    } else {
      pending_dash = true;
    }
  }

  slug
}

/// Return true if the reference carries a URL scheme (`https:`, `mailto:`,
/// ...), i.e. it points outside the library.
#[must_use]
pub fn is_scheme_qualified(href: &str) -> bool {
  let Some((scheme, _)) = href.split_once(':') else {
    return false;
  };
  let mut chars = scheme.chars();
  chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Create a regex that never matches anything.
///
/// Used as the fallback when one of the static patterns fails to compile, so
/// a bad pattern degrades to "no matches" instead of taking the page down.
///
/// # Panics
///
/// Panics if neither fallback pattern compiles, which cannot happen for these
/// literals.
#[must_use]
#[allow(clippy::unwrap_used, reason = "Both literals are valid patterns")]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slugify_lowercases_and_joins_words() {
    assert_eq!(slugify("Hello World"), "hello-world");
    assert_eq!(slugify("foo bar baz"), "foo-bar-baz");
    assert_eq!(slugify("When to Use"), "when-to-use");
  }

  #[test]
  fn test_slugify_collapses_special_characters() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("Costs & Benefits"), "costs-benefits");
    assert_eq!(slugify("foo   bar"), "foo-bar");
    assert_eq!(slugify("snake_case name"), "snake-case-name");
  }

  #[test]
  fn test_slugify_trims_edges() {
    assert_eq!(slugify("  hello  "), "hello");
    assert_eq!(slugify("---hello---"), "hello");
    assert_eq!(slugify("!!!"), "");
    assert_eq!(slugify(""), "");
  }

  #[test]
  fn test_slugify_non_ascii_letters_become_separators() {
    assert_eq!(slugify("Café Menu"), "caf-menu");
    assert_eq!(slugify("Step 2: Ship"), "step-2-ship");
  }

  #[test]
  fn test_slugify_output_shape_and_idempotence() {
    let inputs = [
      "Hello, World!",
      "  -- leading and trailing --  ",
      "Costs & Benefits (2024)",
      "ÜBER straße",
      "a--b__c  d",
      "-",
      "1. Numbered heading",
    ];

    for input in inputs {
      let slug = slugify(input);
      assert!(
        slug
          .chars()
          .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
        "unexpected character in {slug:?}"
      );
      assert!(!slug.starts_with('-'), "leading dash in {slug:?}");
      assert!(!slug.ends_with('-'), "trailing dash in {slug:?}");
      assert!(!slug.contains("--"), "doubled dash in {slug:?}");
      assert_eq!(slugify(&slug), slug);
    }
  }

  #[test]
  fn test_scheme_detection() {
    assert!(is_scheme_qualified("https://example.com/readme.md"));
    assert!(is_scheme_qualified("http://example.com"));
    assert!(is_scheme_qualified("mailto:someone@example.com"));
    assert!(!is_scheme_qualified("patterns/throwaway-spike.md"));
    assert!(!is_scheme_qualified("../patterns/a:b.md"));
    assert!(!is_scheme_qualified("#anchor"));
  }

  #[test]
  fn test_never_matching_regex() {
    let re = never_matching_regex();
    assert!(!re.is_match(""));
    assert!(!re.is_match("anything at all"));
  }
}
