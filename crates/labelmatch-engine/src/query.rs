use labelmatch_core::{field_text, RawAddressRecord};

use crate::prepare::{clean_house_number, sanitize_text};

/// The address fields a resolver reads, already coerced to text.
///
/// Values are raw text, not normalized: each resolver normalizes the fields
/// it uses, once per call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressQuery {
    pub street: String,
    pub house_number: String,
    pub locality: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

impl AddressQuery {
    /// Coerces and sanitizes the address fields of a merchant record.
    ///
    /// The house number goes through [`clean_house_number`], so "S/N" style
    /// placeholders become `"0"`.
    #[must_use]
    pub fn from_record(record: &RawAddressRecord) -> Self {
        let text = |field: Option<&labelmatch_core::Scalar>| sanitize_text(&field_text(field));
        Self {
            street: text(record.street.as_ref()),
            house_number: clean_house_number(&text(record.house_number.as_ref())),
            locality: text(record.locality.as_ref()),
            city: text(record.city.as_ref()),
            province: text(record.province.as_ref()),
            postal_code: text(record.postal_code.as_ref()),
        }
    }

    /// A pickup query from its street and house number.
    #[must_use]
    pub fn street(street: &str, house_number: &str) -> Self {
        Self {
            street: street.to_owned(),
            house_number: house_number.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_locality(mut self, locality: &str) -> Self {
        locality.clone_into(&mut self.locality);
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: &str) -> Self {
        city.clone_into(&mut self.city);
        self
    }

    #[must_use]
    pub fn with_province(mut self, province: &str) -> Self {
        province.clone_into(&mut self.province);
        self
    }

    #[must_use]
    pub fn with_postal_code(mut self, postal_code: &str) -> Self {
        postal_code.clone_into(&mut self.postal_code);
        self
    }
}
