//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces `{key}` with the matching value in a single pass, so inserted
/// values are never re-scanned. Unknown `{...}` (e.g. CSS blocks) is kept as-is.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(tpl.len());
  let mut rest = tpl;
  while let Some(open) = rest.find('{') {
    out.push_str(&rest[..open]);
    let after = &rest[open + 1..];
    let hit = after.find('}').and_then(|close| {
      let key = &after[..close];
      pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (close, *v))
    });
    match hit {
      Some((close, value)) => {
        out.push_str(value);
        rest = &after[close + 1..];
      }
      None => {
        out.push('{');
        rest = after;
      }
    }
  }
  out.push_str(rest);
  out
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fills_known_keys_only() {
    let out = fill_template("<b>{name}</b> {missing} p { color: red; }", &[("name", "Ann")]);
    assert_eq!(out, "<b>Ann</b> {missing} p { color: red; }");
  }

  #[test]
  fn inserted_values_are_not_rescanned() {
    let out = fill_template("{a}|{b}", &[("a", "{b}"), ("b", "B")]);
    assert_eq!(out, "{b}|B");
  }

  #[test]
  fn escapes_markup() {
    assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    assert_eq!(escape_html("~8%"), "~8%");
  }
}
