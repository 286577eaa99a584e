//! Markup helpers shared by the panel formatters.

#[cfg(test)]
#[path = "markup_test.rs"]
mod tests;

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// `<h3>` heading followed by an escaped `<p>` body.
pub fn heading_with_message(heading: &str, message: &str) -> String {
    format!("<h3>{heading}</h3><p>{}</p>", escape(message))
}
