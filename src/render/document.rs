/// HTML 4.01 Strict, the dialect mail clients render most consistently
pub const DOCTYPE_STRICT: &str =
    "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">";

pub const CHARSET: &str = "UTF-8";
pub const MEDIA_TYPE: &str = "text/html";

/// Append-only HTML buffer shared by the section writers.
///
/// Markup is written with `\n`; [`HtmlDocument::into_crlf`] converts the
/// whole document to CRLF line endings for the mail body.
#[derive(Debug, Default)]
pub struct HtmlDocument {
    buf: String,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write markup as-is
    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    /// Write escaped character data
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&html_escape::encode_text(text));
        self
    }

    /// Write an escaped, double-quoted attribute value (without the quotes)
    pub fn attr(&mut self, value: &str) -> &mut Self {
        self.buf
            .push_str(&html_escape::encode_double_quoted_attribute(value));
        self
    }

    pub fn nl(&mut self) -> &mut Self {
        self.raw("\n")
    }

    pub fn br(&mut self) -> &mut Self {
        self.raw("<br>")
    }

    pub fn hr(&mut self) -> &mut Self {
        self.raw("<hr>")
    }

    /// `<tr><th colspan="3">label</th></tr>`
    pub fn section_header(&mut self, label: &str) -> &mut Self {
        self.raw("    <tr><th colspan=\"3\">")
            .text(label)
            .raw("</th></tr>\n")
    }

    /// Blank row between sections
    pub fn spacer_row(&mut self) -> &mut Self {
        self.raw("    <tr><td colspan=\"3\">&#160;</td></tr>\n")
    }

    /// `label:` | gap | `value`, both escaped
    pub fn field_row(&mut self, label: &str, value: &str) -> &mut Self {
        self.raw("    <tr><td style=\"white-space:nowrap\">")
            .text(label)
            .raw(":</td><td>&#160;</td><td>")
            .text(value)
            .raw("</td></tr>\n")
    }

    /// Same as [`field_row`](Self::field_row) but skipped for blank values
    pub fn optional_row(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.field_row(label, v),
            None => self,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Finish the document with every line ending as CRLF
    pub fn into_crlf(self) -> String {
        to_crlf(&self.buf)
    }
}

/// Normalize `\n`, `\r` and `\r\n` to `\r\n`
pub fn to_crlf(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 16);
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\r\n");
            }
            '\n' => out.push_str("\r\n"),
            other => out.push(other),
        }
    }
    out
}
