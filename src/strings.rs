//! String helpers.
//!
//! Wildcard filter matching, numeric casting, templating, highlighting,
//! truncation and the other small transformations consumers reach for when
//! shaping user-facing text. Everything here is char-based, so multibyte
//! input is safe.

use regex::Regex;
use serde_json::Value;

/// Check whether `value` starts with the prefix of a wildcard pattern.
///
/// `with` must end in `*`; the part before the `*` is compared as a prefix.
/// Without a trailing `*` this always returns `false`:
///
/// ```
/// use sidekick::strings::starts_with_wildcard;
///
/// assert!(starts_with_wildcard("foobar", "foo*", false));
/// assert!(!starts_with_wildcard("foobar", "foobar", false));
/// ```
pub fn starts_with_wildcard(value: &str, with: &str, case_insensitive: bool) -> bool {
    if !with.ends_with('*') {
        return false;
    }

    let prefix = with.trim_end_matches('*');

    if case_insensitive {
        value.to_lowercase().starts_with(&prefix.to_lowercase())
    } else {
        value.starts_with(prefix)
    }
}

/// See if filter conditions match the given value.
///
/// Conditions are matched in order and the first match decides the result:
///
/// + `cms_*` matches everything starting with `cms_`.
/// + `!cms_*` negates: a value starting with `cms_` yields `false`.
/// + a condition without `*` must match exactly.
///
/// `cms_*,!admin_*,admin_*` therefore includes all `cms_` values but
/// excludes `admin_` values; the trailing condition never fires. No matching
/// condition means `false`.
pub fn filter_match(value: &str, conditions: &[&str], case_insensitive: bool) -> bool {
    for condition in conditions {
        let mut is_match = true;
        let mut condition = condition.trim();

        if let Some(negated) = condition.strip_prefix('!') {
            is_match = false;
            condition = negated;
        }

        let (value, condition) = if case_insensitive {
            (value.to_lowercase(), condition.to_lowercase())
        } else {
            (value.to_string(), condition.to_string())
        };

        if condition == value || starts_with_wildcard(&value, &condition, false) {
            return is_match;
        }
    }

    false
}

/// [`filter_match`] with a comma-separated condition list.
///
/// ```
/// use sidekick::strings::filter_match_list;
///
/// assert!(filter_match_list("hello", "ho,he*", false));
/// ```
pub fn filter_match_list(value: &str, conditions: &str, case_insensitive: bool) -> bool {
    let conditions: Vec<&str> = conditions
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    filter_match(value, &conditions, case_insensitive)
}

/// Whether a string holds a float-like numeric value.
///
/// Ordinal forms like `"24."` are not floats; anything a float parse accepts
/// otherwise is, including `"2"` and `"1e3"`.
pub fn is_float(value: &str) -> bool {
    let Ok(ordinal) = Regex::new(r"^\d+\.$") else {
        return false;
    };
    if ordinal.is_match(value) {
        return false;
    }

    value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Whether a string is numeric.
///
/// Strict mode accepts digits only, so exponential forms like `"3e30"` are
/// rejected. Non-strict mode accepts anything that parses as a finite number.
pub fn is_numeric(value: &str, strict: bool) -> bool {
    if strict {
        !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
    } else {
        value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
    }
}

/// Cast a numeric string to a JSON number.
///
/// Integral values become integers (`"1.0"` gives `1`), everything else a
/// float. Non-numeric input is returned as a string value unchanged.
pub fn type_cast_numeric(value: &str) -> Value {
    if !is_float(value) {
        return Value::String(value.to_string());
    }

    let Ok(number) = value.parse::<f64>() else {
        return Value::String(value.to_string());
    };

    if number.fract() == 0.0 && number.abs() <= i64::MAX as f64 {
        Value::from(number as i64)
    } else {
        Value::from(number)
    }
}

/// Cast a string to its specific JSON type.
///
/// Numeric strings go through [`type_cast_numeric`], everything else stays a
/// string value.
pub fn type_cast(value: &str) -> Value {
    if is_numeric(value, false) {
        type_cast_numeric(value)
    } else {
        Value::String(value.to_string())
    }
}

/// Replace only the first occurrence found inside the string.
///
/// Case-sensitive: `replace_first("abc", "123", "abc abc")` gives
/// `"123 abc"`.
pub fn replace_first(search: &str, replace: &str, subject: &str) -> String {
    subject.replacen(search, replace, 1)
}

/// Whether any of the needles exists in the haystack.
pub fn contains_any(needles: &[&str], haystack: &str) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Whether all of the needles exist in the haystack.
///
/// An empty needle list never matches.
pub fn contains_all(needles: &[&str], haystack: &str) -> bool {
    !needles.is_empty() && needles.iter().all(|needle| haystack.contains(needle))
}

/// "Minify" HTML content.
///
/// Removes newlines, tabs and runs of whitespace between tags. When
/// `strip_comments` is set, HTML comments are removed as well.
pub fn minify(content: &str, strip_comments: bool) -> String {
    let passes: [(&str, &str); 4] = [
        (r"[\n\r]", ""),
        (r">[^\S ]+", ">"),
        (r"[^\S ]+<", "<"),
        (r"(\s)\s+", "$1"),
    ];

    let mut min = content.trim().to_string();
    for (pattern, replacement) in passes {
        if let Ok(re) = Regex::new(pattern) {
            min = re.replace_all(&min, replacement).to_string();
        }
    }

    min = min.replace("> <", "><");

    if strip_comments {
        if let Ok(re) = Regex::new(r"(?s)<!--.*?-->") {
            min = re.replace_all(&min, "").to_string();
        }
    }

    min
}

/// Truncate content to `length` chars, appending `affix` when cut.
pub fn truncate(content: &str, length: usize, affix: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() <= length {
        return content.to_string();
    }

    let mut out: String = chars[..length].iter().collect();
    out.push_str(affix);
    out
}

/// Cut a word from the content, truncating to its left and right.
///
/// Keeps `length` chars on either side of the word and marks cut ends with
/// `affix`:
///
/// ```
/// use sidekick::strings::truncate_middle;
///
/// let cut = truncate_middle("the quick fox jumped over the lazy dog", "jumped", 12, "..", false);
/// assert_eq!(cut, "..e quick fox jumped over the la..");
/// ```
///
/// When the word is absent the content is truncated from the start with
/// twice the length instead. HTML tags are stripped before cutting.
pub fn truncate_middle(
    content: &str,
    word: &str,
    length: usize,
    affix: &str,
    case_insensitive: bool,
) -> String {
    let content = strip_tags(content);

    let position = if case_insensitive {
        char_position(&content.to_lowercase(), &word.to_lowercase())
    } else {
        char_position(&content, word)
    };

    let Some(first) = position else {
        // left plus right side, hence twice the length
        return truncate(&content, length * 2, affix);
    };

    let chars: Vec<char> = content.chars().collect();
    let word_len = word.chars().count();
    let last = (first + word_len).min(chars.len());

    let left = &chars[..first];
    let middle: String = chars[first..last].iter().collect();
    let right = &chars[last..];

    let before = if left.len() > length {
        format!(
            "{}{}",
            affix,
            left[left.len() - length..].iter().collect::<String>()
        )
    } else {
        left.iter().collect()
    };

    let after = if right.len() > length {
        format!("{}{}", right[..length].iter().collect::<String>(), affix)
    } else {
        right.iter().collect()
    };

    format!("{}{}{}", before, middle, after)
}

fn strip_tags(content: &str) -> String {
    match Regex::new(r"<[^>]*>") {
        Ok(re) => re.replace_all(content, "").to_string(),
        Err(_) => content.to_string(),
    }
}

fn char_position(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_pos| haystack[..byte_pos].chars().count())
}

/// Highlight one or more words within a content, case-insensitively.
///
/// The markup is a `%s` template, so the default `<b>%s</b>` wraps each hit
/// in bold tags:
///
/// ```
/// use sidekick::strings::highlight_word;
///
/// assert_eq!(
///     highlight_word("Hello John!", &["john"], "<b>%s</b>"),
///     "Hello <b>John</b>!"
/// );
/// ```
///
/// Matching is transliteration-aware: searching for `frederic` highlights
/// `fréderic` in its original spelling. Words already contained in a longer
/// listed word are dropped, otherwise a highlight could land inside another
/// highlight.
pub fn highlight_word(content: &str, words: &[&str], markup: &str) -> String {
    let transliterated = transliterate(content);

    let mut words = dedupe(words);
    if words.len() > 1 {
        let all = words.clone();
        words.retain(|word| !all.iter().any(|other| other != word && other.contains(word)));
    }

    let mut highlights: Vec<String> = Vec::new();
    for word in &words {
        let Ok(re) = Regex::new(&format!("(?i){}+", regex::escape(word))) else {
            continue;
        };

        // the literal match wins; transliterated hits map back to the
        // original spelling
        if let Some(found) = re.find(content) {
            highlights.push(found.as_str().to_string());
        }

        for found in re.find_iter(&transliterated) {
            highlights.push(slice_transliterated_word(
                found.as_str(),
                &transliterated,
                content,
            ));
        }
    }

    let highlights: Vec<String> = dedupe(&highlights.iter().map(String::as_str).collect::<Vec<_>>())
        .into_iter()
        .filter(|h| !h.is_empty())
        .collect();

    let mut content = content.to_string();
    for highlight in &highlights {
        content = content.replace(highlight.as_str(), &format!("[[{}]]", highlight));
    }

    let Ok(marker) = Regex::new(r"\[\[(.*?)\]\]") else {
        return content;
    };

    let mut replacements: Vec<(String, String)> = Vec::new();
    for caps in marker.captures_iter(&content) {
        let token = caps[0].to_string();
        if !replacements.iter().any(|(existing, _)| *existing == token) {
            let wrapped = markup.replacen("%s", &caps[1], 1);
            replacements.push((token, wrapped));
        }
    }

    for (search, replace) in replacements {
        content = content.replace(&search, &replace);
    }

    content
}

/// Map a match in transliterated text back onto the original text.
///
/// ```
/// use sidekick::strings::slice_transliterated_word;
///
/// assert_eq!(
///     slice_transliterated_word("frederic", "Hello frederic", "Hello fréderic"),
///     "fréderic"
/// );
/// ```
pub fn slice_transliterated_word(
    word: &str,
    transliterated_text: &str,
    original_text: &str,
) -> String {
    let Some(start) = char_position(transliterated_text, word) else {
        return word.to_string();
    };

    original_text
        .chars()
        .skip(start)
        .take(word.chars().count())
        .collect()
}

/// ASCII-fold a string, preserving its char count.
///
/// Each non-ASCII char is replaced by the first char of its ASCII
/// approximation (`é` becomes `e`), so positions in the result line up with
/// positions in the input. Chars without an approximation pass through.
pub fn transliterate(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii() {
                c
            } else {
                deunicode::deunicode_char(c)
                    .and_then(|ascii| ascii.chars().next())
                    .unwrap_or(c)
            }
        })
        .collect()
}

fn dedupe(items: &[&str]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(**item))
        .map(ToString::to_string)
        .collect()
}

/// Substitute `{{ name }}` variables in a template.
///
/// Inner whitespace is trimmed, so `{{ name }}` and `{{name}}` are the same
/// variable. Unknown variables are kept verbatim unless `remove_empty` is
/// set:
///
/// ```
/// use sidekick::strings::template;
///
/// let out = template("<p>{{ name }}</p>", &[("name", "John")], false);
/// assert_eq!(out, "<p>John</p>");
/// ```
pub fn template(template: &str, variables: &[(&str, &str)], remove_empty: bool) -> String {
    template_with_delimiters(template, variables, remove_empty, "{{", "}}")
}

/// [`template`] with custom variable delimiters.
pub fn template_with_delimiters(
    template: &str,
    variables: &[(&str, &str)],
    remove_empty: bool,
    left: &str,
    right: &str,
) -> String {
    let pattern = format!("{}(.*?){}", regex::escape(left), regex::escape(right));
    let Ok(re) = Regex::new(&pattern) else {
        return template.to_string();
    };

    let tokens: Vec<(String, String)> = re
        .captures_iter(template)
        .map(|caps| (caps[0].to_string(), caps[1].trim().to_string()))
        .collect();

    let mut result = template.to_string();
    for (token, name) in tokens {
        if let Some((_, value)) = variables.iter().find(|(key, _)| *key == name) {
            result = result.replace(&token, value);
        } else if remove_empty {
            result = result.replace(&token, "");
        }
    }

    result
}

/// Convert a text with different separators to a list.
///
/// Splits on newlines, `;` and `,`; entries are trimmed and empties dropped.
/// This is the common shape of user input like "a list of domains, one per
/// line or comma separated".
pub fn text_list(text: &str) -> Vec<String> {
    text_list_with(text, &["\r\n", "\n", "\r", ";", ","])
}

/// [`text_list`] with custom separators.
pub fn text_list_with(text: &str, separators: &[&str]) -> Vec<String> {
    let mut normalized = text.to_string();
    for separator in separators {
        normalized = normalized.replace(separator, ";");
    }

    normalized
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Convert a YouTube link to an embeddable video URL.
///
/// Recognizes watch, share, embed and nocookie URL shapes; anything else
/// gives `None`.
pub fn to_youtube_embed(url: &str) -> Option<String> {
    let re = Regex::new(
        r#"(?i)(?:youtube(?:-nocookie)?\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/ ]{11})"#,
    )
    .ok()?;

    let caps = re.captures(url)?;
    Some(format!("https://www.youtube.com/embed/{}", &caps[1]))
}
