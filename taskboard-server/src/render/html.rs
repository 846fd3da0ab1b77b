//! HTML escaping and the page shell.

use std::borrow::Cow;

use super::theme;

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Wraps `main` in a complete HTML document with the dark page styling.
#[must_use]
pub fn document(title: &str, main: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body style=\"margin:0;padding:0;font-family:{font};background-color:{bg};color:{fg}\">\n\
         {main}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        font = theme::FONT_STACK,
        bg = theme::BG_PAGE,
        fg = theme::FG_PRIMARY,
    )
}
