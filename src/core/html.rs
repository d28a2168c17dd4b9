// src/core/html.rs
//! Low-level HTML string helpers.
//!
//! No DOM, just case-insensitive scanning for tag blocks inside a known
//! region (`<table>…</table>`, `<tr>…</tr>`, `<td>…</td>`). A block whose end
//! tag is omitted runs up to the next sibling of the same kind, or to the end
//! of the region. Comments are not tags; strip them with [`strip_comments`]
//! before scanning.
//! Lowercasing is ASCII-only so byte offsets stay aligned with the original text.

use super::sanitize::{decode_entities, normalize_ws};

/// One `<a href=…>text</a>` found inside a fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Raw `href` value with entities decoded; not yet resolved against a base.
    pub href: Option<String>,
    /// Visible text, whitespace-collapsed.
    pub text: String,
}

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Position of the next `open_tag` (e.g. `"<tr"`) at or after `from`, in an
/// already-lowercased haystack. Rejects prefixes of longer tag names
/// (`<a` must not match `<abbr>`).
fn find_open_tag(lc: &str, open_lc: &str, from: usize) -> Option<usize> {
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(open_lc)? + at;
        let after = start + open_lc.len();
        match lc.as_bytes().get(after) {
            Some(b) if b.is_ascii_alphanumeric() => at = after,
            _ => return Some(start),
        }
    }
}

/// `s` with every `<!-- … -->` removed. An unterminated comment runs to the end.
pub fn strip_comments(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find("<!--") {
        out.push_str(&rest[..open]);
        rest = match rest[open + 4..].find("-->") {
            Some(close) => &rest[open + 4 + close + 3..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Returns the HTML *inside* the first `open_pat … close_pat` pair.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open = find_open_tag(&lc, &to_lower(open_pat), 0)?;
    let after = s[open..].find('>')? + open + 1;
    let close = lc[after..].find(&to_lower(close_pat))?;
    Some(&s[after..after + close])
}

/// Next tag block from `from` onwards, as `(start, end)` spanning `<tr …>`
/// through `</tr>`, or up to the next `<tr` (or the end of `s`) when the end
/// tag is omitted. `lc` is `s` lowercased; patterns are lowercase.
fn block_from(s: &str, lc: &str, open_lc: &str, close_lc: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_open_tag(lc, open_lc, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let next_open = find_open_tag(lc, open_lc, open_end).unwrap_or(s.len());
    let end = match lc[open_end..next_open].find(close_lc) {
        Some(rel) => open_end + rel + close_lc.len(),
        None => next_open,
    };
    Some((start, end))
}

/// All blocks of one tag kind inside `s`, in document order.
pub fn tag_blocks<'a>(s: &'a str, open_tag: &str, close_tag: &str) -> Vec<&'a str> {
    // lowercase once; per-call lowercasing goes quadratic on long tables
    let lc = to_lower(s);
    let (open_lc, close_lc) = (to_lower(open_tag), to_lower(close_tag));

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = block_from(s, &lc, &open_lc, &close_lc, pos) {
        out.push(&s[b_s..b_e]);
        pos = b_e;
    }
    out
}

/// Given `<td …>INNER</td>` (or `<td …>INNER` with the end tag omitted),
/// return INNER. It may still contain nested tags.
pub fn inner_after_open_tag(block: &str) -> &str {
    let Some(open_end) = block.find('>') else {
        return "";
    };
    let inner = &block[open_end + 1..];

    let name = block
        .get(1..)
        .map(|rest| &rest[..rest.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(0)])
        .unwrap_or("");
    let close = join!("</", name, ">");
    match inner.len().checked_sub(close.len()) {
        Some(at) if !name.is_empty() && inner.as_bytes()[at..].eq_ignore_ascii_case(close.as_bytes()) => {
            &inner[..at]
        }
        _ => inner,
    }
}

/// Remove all `<...>` tags, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// What a reader sees: tags stripped, entities decoded, whitespace collapsed.
pub fn visible_text(s: &str) -> String {
    normalize_ws(&decode_entities(&strip_tags(s)))
}

/// Value of attribute `name` inside an opening tag such as `<a href="x" …>`.
/// Handles double, single and unquoted values, with or without whitespace
/// around the `=`.
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let name_lc = to_lower(name);
    let mut from = 0usize;

    let val_start = loop {
        let p = lc.get(from..)?.find(&name_lc)? + from;
        from = p + name_lc.len();
        // must be a whole attribute name, not the tail of `data-href`
        if p > 0 && !lc.as_bytes()[p - 1].is_ascii_whitespace() {
            continue;
        }
        // ...nor the head of `hreflang`
        if let Some(v) = lc[from..].trim_start().strip_prefix('=') {
            break lc.len() - v.len();
        }
    };

    let val = open_tag[val_start..].trim_start();
    let (quote, start_off) = match val.as_bytes().first() {
        Some(b'"') => (Some('"'), 1),
        Some(b'\'') => (Some('\''), 1),
        _ => (None, 0),
    };
    let end = match quote {
        Some(q) => val[start_off..].find(q).map(|e| start_off + e),
        None => val.find(|c: char| c.is_ascii_whitespace() || c == '>'),
    }
    .unwrap_or(val.len());

    Some(decode_entities(&val[start_off..end]).trim().to_string())
}

/// Every `<a …>…</a>` inside `fragment`, in order.
pub fn links(fragment: &str) -> Vec<Link> {
    tag_blocks(fragment, "<a", "</a>")
        .into_iter()
        .map(|block| {
            let open_end = block.find('>').map(|e| e + 1).unwrap_or(block.len());
            Link {
                href: attr_value(&block[..open_end], "href").filter(|h| !h.is_empty()),
                text: visible_text(inner_after_open_tag(block)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_skip_longer_tag_names() {
        let s = r#"<abbr>x</abbr><A HREF="one.pdf">One</A>"#;
        let found = links(s);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].href.as_deref(), Some("one.pdf"));
        assert_eq!(found[0].text, "One");
    }

    #[test]
    fn attr_value_quoting_styles() {
        assert_eq!(attr_value(r#"<a href="a b.pdf">"#, "href").as_deref(), Some("a b.pdf"));
        assert_eq!(attr_value("<a href='x.pdf'>", "href").as_deref(), Some("x.pdf"));
        assert_eq!(attr_value("<a href=x.pdf target=_blank>", "href").as_deref(), Some("x.pdf"));
        assert_eq!(attr_value(r#"<a data-href="no" href="yes">"#, "href").as_deref(), Some("yes"));
        assert_eq!(attr_value("<a name=top>", "href"), None);
    }

    #[test]
    fn attr_value_allows_spaces_around_equals() {
        assert_eq!(attr_value(r#"<a href = "v.php">"#, "href").as_deref(), Some("v.php"));
        assert_eq!(attr_value("<a\n  HREF=\n'w.php'>", "href").as_deref(), Some("w.php"));
        assert_eq!(attr_value(r#"<a hreflang="zh" href="x.php">"#, "href").as_deref(), Some("x.php"));
        assert_eq!(attr_value(r#"<a title="href" >"#, "href"), None);
    }

    #[test]
    fn omitted_end_tags_end_at_next_sibling() {
        let cells: Vec<&str> = tag_blocks("<td>a<td><b>b</b></td><TD>c", "<td", "</td>")
            .into_iter()
            .map(inner_after_open_tag)
            .collect();
        assert_eq!(cells, ["a", "<b>b</b>", "c"]);
    }

    #[test]
    fn comments_are_removed() {
        assert_eq!(strip_comments("a<!-- <table> -->b<!-- x"), "ab");
        assert_eq!(strip_comments("plain"), "plain");
    }

    #[test]
    fn href_entities_are_decoded() {
        let l = links(r#"<a href="view.php?id=3&amp;t=1">看</a>"#);
        assert_eq!(l[0].href.as_deref(), Some("view.php?id=3&t=1"));
    }

    #[test]
    fn visible_text_collapses_markup() {
        assert_eq!(visible_text("  <b>113/05/01</b>&nbsp;\n "), "113/05/01");
        assert_eq!(visible_text("A &amp; B<br>C"), "A & BC");
    }

    #[test]
    fn inner_of_malformed_block_is_empty() {
        assert_eq!(inner_after_open_tag("<td>"), "");
        assert_eq!(inner_after_open_tag("<td>x</td>"), "x");
        assert_eq!(inner_after_open_tag("<td>x</TD>"), "x");
        assert_eq!(inner_after_open_tag("<td>x<a>y</a>"), "x<a>y</a>");
    }
}
