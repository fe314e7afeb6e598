//! Per-step section writers for the summary table

use super::{CountryDirectory, HtmlDocument};
use crate::i18n::{Locale, MessageSource};
use crate::models::{BillingForm, OrganizationForm, PackageSelection, TechnicalForm};

/// Message lookup bound to the recipient's locale
#[derive(Clone, Copy)]
pub struct SectionContext<'a> {
    pub messages: &'a dyn MessageSource,
    pub locale: &'a Locale,
}

impl<'a> SectionContext<'a> {
    pub fn new(messages: &'a dyn MessageSource, locale: &'a Locale) -> Self {
        Self { messages, locale }
    }

    pub fn label(&self, key: &str) -> String {
        self.messages.message(self.locale, key, &[])
    }
}

pub fn write_package(doc: &mut HtmlDocument, ctx: SectionContext<'_>, package: &PackageSelection) {
    let name = if package.display.trim().is_empty() {
        package.name.as_str()
    } else {
        package.display.as_str()
    };

    doc.field_row(&ctx.label("package.name.prompt"), name)
        .field_row(&ctx.label("package.monthlyRate.prompt"), &package.monthly_rate)
        .optional_row(&ctx.label("package.setupFee.prompt"), package.setup_fee.as_deref());
}

pub fn write_organization(
    doc: &mut HtmlDocument,
    ctx: SectionContext<'_>,
    countries: &dyn CountryDirectory,
    form: &OrganizationForm,
) {
    doc.field_row(&ctx.label("organization.name.prompt"), &form.organization_name)
        .field_row(&ctx.label("organization.phone.prompt"), &form.phone)
        .optional_row(&ctx.label("organization.fax.prompt"), form.fax.as_deref());

    write_address(
        doc,
        ctx,
        countries,
        &Address {
            address1: &form.address1,
            address2: form.address2.as_deref(),
            city: &form.city,
            state: form.state.as_deref(),
            country: &form.country,
            zip: form.zip.as_deref(),
        },
    );
}

pub fn write_technical(
    doc: &mut HtmlDocument,
    ctx: SectionContext<'_>,
    countries: &dyn CountryDirectory,
    form: &TechnicalForm,
) {
    doc.field_row(&ctx.label("technical.contactName.prompt"), &form.contact_name)
        .optional_row(&ctx.label("technical.title.prompt"), form.title.as_deref())
        .field_row(&ctx.label("technical.workPhone.prompt"), &form.work_phone)
        .optional_row(&ctx.label("technical.cellPhone.prompt"), form.cell_phone.as_deref())
        .field_row(&ctx.label("technical.email.prompt"), &form.email);

    write_address(
        doc,
        ctx,
        countries,
        &Address {
            address1: &form.address1,
            address2: form.address2.as_deref(),
            city: &form.city,
            state: form.state.as_deref(),
            country: &form.country,
            zip: form.zip.as_deref(),
        },
    );
}

pub fn write_billing(doc: &mut HtmlDocument, ctx: SectionContext<'_>, form: &BillingForm) {
    let expiration = format!("{}/{}", form.expiration_month, form.expiration_year);

    doc.field_row(&ctx.label("billing.contact.prompt"), &form.contact)
        .field_row(&ctx.label("billing.email.prompt"), &form.email)
        .field_row(&ctx.label("billing.phone.prompt"), &form.phone)
        .field_row(&ctx.label("billing.cardholderName.prompt"), &form.cardholder_name)
        .field_row(&ctx.label("billing.cardNumber.prompt"), &form.masked_card_number())
        .field_row(&ctx.label("billing.expirationDate.prompt"), &expiration)
        .field_row(&ctx.label("billing.streetAddress.prompt"), &form.street_address)
        .field_row(&ctx.label("address.city.prompt"), &form.city)
        .optional_row(&ctx.label("address.state.prompt"), form.state.as_deref())
        .optional_row(&ctx.label("address.zip.prompt"), form.postal_code.as_deref())
        .field_row(&ctx.label("address.country.prompt"), &form.country_code);
}

struct Address<'a> {
    address1: &'a str,
    address2: Option<&'a str>,
    city: &'a str,
    state: Option<&'a str>,
    country: &'a str,
    zip: Option<&'a str>,
}

fn write_address(
    doc: &mut HtmlDocument,
    ctx: SectionContext<'_>,
    countries: &dyn CountryDirectory,
    address: &Address<'_>,
) {
    // Unknown codes are shown verbatim
    let country = countries
        .country_name(address.country)
        .unwrap_or(address.country);

    doc.field_row(&ctx.label("address.address1.prompt"), address.address1)
        .optional_row(&ctx.label("address.address2.prompt"), address.address2)
        .field_row(&ctx.label("address.city.prompt"), address.city)
        .optional_row(&ctx.label("address.state.prompt"), address.state)
        .field_row(&ctx.label("address.country.prompt"), country)
        .optional_row(&ctx.label("address.zip.prompt"), address.zip);
}
