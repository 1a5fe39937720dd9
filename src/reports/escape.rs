//! Escaping utilities for HTML report generation.
//!
//! Inventory files are edited by hand and catalog payloads come from the
//! network, so any cell may contain markup. Everything embedded in a report
//! goes through [`escape_html`].

/// Escape a string for safe inclusion in HTML content.
///
/// Escapes the following characters:
/// - `&` -> `&amp;`
/// - `<` -> `&lt;`
/// - `>` -> `&gt;`
/// - `"` -> `&quot;`
/// - `'` -> `&#x27;`
///
/// # Examples
///
/// ```
/// use ntl_systoolbox::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<b>srv-01</b>"), "&lt;b&gt;srv-01&lt;/b&gt;");
/// assert_eq!(escape_html("Windows Server"), "Windows Server");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an HTML cell, rendering empty values as a dash.
pub fn escape_html_cell(s: &str) -> String {
    if s.trim().is_empty() {
        "-".to_string()
    } else {
        escape_html(s)
    }
}
