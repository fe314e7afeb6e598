//! HTML rendering of the sign-up summary mail

mod countries;
mod document;
mod sections;

pub use countries::{CountryDirectory, StaticCountries};
pub use document::{to_crlf, HtmlDocument, CHARSET, DOCTYPE_STRICT, MEDIA_TYPE};
pub use sections::SectionContext;

use crate::i18n::{Locale, MessageSource};
use crate::models::SignupSummary;
use crate::resources::{ResourceLoader, TEXTSKIN_CSS};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read resource {path}: {source}")]
    Resource {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A finished summary mail, ready for transport
#[derive(Debug, Clone)]
pub(crate) struct RenderedSummary {
    pub subject: String,
    /// Serialized document with CRLF line endings
    pub body: String,
    pub media_type: &'static str,
    pub charset: &'static str,
}

/// Collaborators the summary document is built from
#[derive(Clone, Copy)]
pub(crate) struct SummaryRenderer<'a> {
    pub messages: &'a dyn MessageSource,
    pub countries: &'a dyn CountryDirectory,
    pub resources: &'a dyn ResourceLoader,
}

impl<'a> SummaryRenderer<'a> {
    /// Subject line for a sign-up
    pub fn subject(&self, locale: &Locale, tracking_key: &str) -> String {
        self.messages.message(
            locale,
            "serverConfirmationCompleted.email.subject",
            &[tracking_key],
        )
    }

    pub fn render(
        &self,
        summary: &SignupSummary,
        locale: &Locale,
    ) -> Result<RenderedSummary, RenderError> {
        let subject = self.subject(locale, &summary.tracking_key);
        let content_type = format!("{}; charset={}", MEDIA_TYPE, CHARSET);
        let ctx = SectionContext::new(self.messages, locale);

        let mut doc = HtmlDocument::new();
        doc.raw(DOCTYPE_STRICT).nl();
        doc.raw("<html lang=\"").attr(locale.tag()).raw("\">\n<head>\n");
        doc.raw("    <meta http-equiv=\"Content-Type\" content=\"")
            .attr(&content_type)
            .raw("\">\n");
        doc.raw("    <meta http-equiv=\"Content-Style-Type\" content=\"text/css\">\n");
        doc.raw("    <meta http-equiv=\"Content-Script-Type\" content=\"text/javascript\">\n");
        doc.raw("    <title>").text(&subject).raw("</title>\n");
        self.write_stylesheet(&mut doc)?;
        doc.raw("</head>\n<body>\n");

        doc.raw("<table style=\"border:0px\" cellpadding=\"0\" cellspacing=\"0\">\n");
        // Catalog entries may carry markup; only the caller's argument is escaped
        let tracking_key = html_escape::encode_text(&summary.tracking_key);
        doc.raw("    <tr><td style=\"white-space:nowrap\" colspan=\"3\">\n        ")
            .raw(&self.messages.message(locale, &summary.status_key, &[&*tracking_key]))
            .br()
            .raw("\n        ")
            .br()
            .raw("\n        ")
            .raw(&ctx.label("serverConfirmationCompleted.belowIsSummary"))
            .br()
            .raw("\n        ")
            .hr()
            .raw("\n    </td></tr>\n");

        doc.section_header(&ctx.label("steps.selectPackage.label"));
        sections::write_package(&mut doc, ctx, &summary.package);

        doc.spacer_row()
            .section_header(&ctx.label("steps.organizationInfo.label"));
        sections::write_organization(&mut doc, ctx, self.countries, &summary.organization);

        doc.spacer_row()
            .section_header(&ctx.label("steps.technicalInfo.label"));
        sections::write_technical(&mut doc, ctx, self.countries, &summary.technical);

        doc.spacer_row()
            .section_header(&ctx.label("steps.billingInformation.label"));
        sections::write_billing(&mut doc, ctx, &summary.billing);

        doc.raw("</table>\n</body>\n</html>\n");

        Ok(RenderedSummary {
            subject,
            body: doc.into_crlf(),
            media_type: MEDIA_TYPE,
            charset: CHARSET,
        })
    }

    /// Inline the text-skin stylesheet; absence only warrants a warning
    fn write_stylesheet(&self, doc: &mut HtmlDocument) -> Result<(), RenderError> {
        let css = self
            .resources
            .load(TEXTSKIN_CSS)
            .map_err(|source| RenderError::Resource {
                path: TEXTSKIN_CSS.to_string(),
                source,
            })?;

        match css {
            Some(css) if css.to_ascii_lowercase().contains("</style") => {
                tracing::warn!(
                    resource = TEXTSKIN_CSS,
                    "Stylesheet would close the style element, leaving it out"
                );
            }
            Some(css) => {
                doc.raw("    <style type=\"text/css\">\n")
                    .raw(css.trim_end())
                    .raw("\n    </style>\n");
            }
            None => {
                tracing::warn!(resource = TEXTSKIN_CSS, "Unable to find resource");
            }
        }

        Ok(())
    }
}
