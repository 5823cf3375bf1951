//! Clean (pre-typo) field generation.

use crate::error::GenerationError;
use crate::generators::{one_of, pattern, uuid_gen, Gen, OneOf};
use crate::locale::{Locale, LocaleData};
use crate::region::Region;
use rand::RngCore;
use uuid::Uuid;

/// The four generated values of a record, before it gets its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub identifier: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Generate the clean fields of one record.
///
/// Draw order is fixed: identifier, first, middle and last name, the address
/// parts in reading order, then the phone digits.
pub fn generate_fields(
    region: Region,
    data: &LocaleData,
    rng: &mut dyn RngCore,
) -> Result<RecordFields, GenerationError> {
    let tables = Tables {
        locale: region.locale(),
        data,
    };

    let identifier = uuid_gen().map(|id: Uuid| id.to_string()).generate(rng);

    let first = tables.pick("first_names", &data.first_names, rng)?;
    let middle = tables.pick("middle_names", &data.middle_names, rng)?;
    let last = tables.pick("last_names", &data.last_names, rng)?;
    let name = format!("{first} {middle} {last}");

    let address = match region {
        Region::Mexico => {
            let street = tables.street_address_name_first(rng)?;
            let city = tables.pick("cities", &data.cities, rng)?;
            let state = tables.pick("regions", &data.regions, rng)?;
            format!("{street} {city} {state}")
        }
        Region::UnitedStates => {
            let street = tables.street_address_number_first(rng)?;
            let city = tables.pick("cities", &data.cities, rng)?;
            let state = tables.pick("regions", &data.regions, rng)?;
            let zip = tables.template("postcodes", &data.postcodes, rng)?;
            format!("{street}, {city}, {state} {zip}")
        }
        Region::GreatBritain => {
            let street = tables.street_address_number_first(rng)?;
            let city = tables.pick("cities", &data.cities, rng)?;
            let county = tables.pick("regions", &data.regions, rng)?;
            let postcode = tables.template("postcodes", &data.postcodes, rng)?;
            format!("{street}, {city}, {county}, {postcode}")
        }
    };

    let phone = pattern(data.phone_format.as_str()).generate(rng);

    Ok(RecordFields {
        identifier,
        name,
        address,
        phone,
    })
}

struct Tables<'a> {
    locale: Locale,
    data: &'a LocaleData,
}

impl<'a> Tables<'a> {
    fn one_of(
        &self,
        table: &'static str,
        items: &'a [String],
    ) -> Result<OneOf<'a, String>, GenerationError> {
        one_of(items).ok_or_else(|| GenerationError::empty_table(self.locale, table))
    }

    fn pick(
        &self,
        table: &'static str,
        items: &'a [String],
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        Ok(self.one_of(table, items)?.generate(rng))
    }

    /// Pick a template from `items`, then fill it.
    fn template(
        &self,
        table: &'static str,
        items: &'a [String],
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        Ok(self
            .one_of(table, items)?
            .then(|template: String| pattern(template))
            .generate(rng))
    }

    /// `"<prefix> <street name> <number>"`, e.g. `Calle Hidalgo 123`.
    fn street_address_name_first(&self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        let prefix = self.pick("street_prefixes", &self.data.street_prefixes, rng)?;
        let street = self.pick("street_names", &self.data.street_names, rng)?;
        let number = self.template("building_numbers", &self.data.building_numbers, rng)?;
        Ok(format!("{prefix} {street} {number}"))
    }

    /// `"<number> <street name> <suffix>"`, e.g. `1204 Maple Avenue`.
    fn street_address_number_first(
        &self,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        let number = self.template("building_numbers", &self.data.building_numbers, rng)?;
        let street = self.pick("street_names", &self.data.street_names, rng)?;
        let suffix = self.pick("street_suffixes", &self.data.street_suffixes, rng)?;
        Ok(format!("{number} {street} {suffix}"))
    }
}
