//! Locale tables and the catalog that hands them out.
//!
//! The catalog is built once and shared read-only; nothing in here holds
//! random state. Tables may be partially replaced from a YAML file.

use crate::error::LocaleFileError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Locale codes with a built-in table set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Locale {
    #[serde(rename = "es_MX")]
    EsMx,
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "en_GB")]
    EnGb,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::EsMx => "es_MX",
            Locale::EnUs => "en_US",
            Locale::EnGb => "en_GB",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Word lists and templates for one locale.
///
/// `regions` holds whatever the address layout puts after the city: Mexican
/// states, US state abbreviations or British counties. Templates use `#`
/// for a digit and `?` for an uppercase letter.
///
/// Not every layout reads every table; an unread table may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleData {
    pub first_names: Vec<String>,
    pub middle_names: Vec<String>,
    pub last_names: Vec<String>,
    /// Read by the Mexico layout only.
    pub street_prefixes: Vec<String>,
    pub street_names: Vec<String>,
    /// Read by the United States and Great Britain layouts only.
    pub street_suffixes: Vec<String>,
    pub building_numbers: Vec<String>,
    pub cities: Vec<String>,
    pub regions: Vec<String>,
    /// Read by the United States and Great Britain layouts only.
    pub postcodes: Vec<String>,
    pub phone_format: String,
}

/// Replacement tables for one locale. Absent tables keep the built-in
/// values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleOverride {
    pub first_names: Option<Vec<String>>,
    pub middle_names: Option<Vec<String>>,
    pub last_names: Option<Vec<String>>,
    pub street_prefixes: Option<Vec<String>>,
    pub street_names: Option<Vec<String>>,
    pub street_suffixes: Option<Vec<String>>,
    pub building_numbers: Option<Vec<String>>,
    pub cities: Option<Vec<String>>,
    pub regions: Option<Vec<String>>,
    pub postcodes: Option<Vec<String>>,
    pub phone_format: Option<String>,
}

impl LocaleData {
    pub fn builtin(locale: Locale) -> Self {
        match locale {
            Locale::EsMx => es_mx(),
            Locale::EnUs => en_us(),
            Locale::EnGb => en_gb(),
        }
    }

    /// Replace every table present in `patch`.
    pub fn apply(&mut self, patch: LocaleOverride) {
        fn replace<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        replace(&mut self.first_names, patch.first_names);
        replace(&mut self.middle_names, patch.middle_names);
        replace(&mut self.last_names, patch.last_names);
        replace(&mut self.street_prefixes, patch.street_prefixes);
        replace(&mut self.street_names, patch.street_names);
        replace(&mut self.street_suffixes, patch.street_suffixes);
        replace(&mut self.building_numbers, patch.building_numbers);
        replace(&mut self.cities, patch.cities);
        replace(&mut self.regions, patch.regions);
        replace(&mut self.postcodes, patch.postcodes);
        replace(&mut self.phone_format, patch.phone_format);
    }
}

/// One table set per locale, built once and shared.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    es_mx: LocaleData,
    en_us: LocaleData,
    en_gb: LocaleData,
}

impl LocaleCatalog {
    /// Catalog with the built-in tables only.
    pub fn builtin() -> Self {
        Self {
            es_mx: LocaleData::builtin(Locale::EsMx),
            en_us: LocaleData::builtin(Locale::EnUs),
            en_gb: LocaleData::builtin(Locale::EnGb),
        }
    }

    /// Built-in tables patched with per-locale overrides.
    pub fn with_overrides(overrides: HashMap<Locale, LocaleOverride>) -> Self {
        let mut catalog = Self::builtin();
        for (locale, patch) in overrides {
            catalog.get_mut(locale).apply(patch);
        }
        catalog
    }

    /// Load overrides from a YAML file keyed by locale code.
    ///
    /// ```yaml
    /// en_GB:
    ///   cities: [Bath, Wells]
    ///   phone_format: "+44 #### ######"
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, LocaleFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| LocaleFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: HashMap<Locale, LocaleOverride> =
            serde_yaml::from_str(&content).map_err(|source| LocaleFileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::with_overrides(overrides))
    }

    pub fn get(&self, locale: Locale) -> &LocaleData {
        match locale {
            Locale::EsMx => &self.es_mx,
            Locale::EnUs => &self.en_us,
            Locale::EnGb => &self.en_gb,
        }
    }

    fn get_mut(&mut self, locale: Locale) -> &mut LocaleData {
        match locale {
            Locale::EsMx => &mut self.es_mx,
            Locale::EnUs => &mut self.en_us,
            Locale::EnGb => &mut self.en_gb,
        }
    }
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn es_mx() -> LocaleData {
    LocaleData {
        first_names: owned(&[
            "José", "María", "Juan", "Guadalupe", "Luis", "Ana", "Carlos", "Verónica",
            "Jorge", "Alejandra", "Miguel", "Fernanda", "Ricardo", "Lucía", "Andrés",
            "Sofía", "Héctor", "Mariana", "Raúl", "Ximena", "Emiliano", "Valeria",
            "Joaquín", "Renata",
        ]),
        middle_names: owned(&[
            "Antonio", "Elena", "Ángel", "Isabel", "Manuel", "Concepción", "Francisco",
            "Teresa", "Alberto", "Beatriz", "Rafael", "Patricia", "Tomás", "Inés",
            "Ignacio", "Leticia",
        ]),
        last_names: owned(&[
            "Hernández", "García", "Martínez", "López", "González", "Pérez", "Rodríguez",
            "Sánchez", "Ramírez", "Cruz", "Flores", "Gómez", "Morales", "Vázquez",
            "Jiménez", "Reyes", "Díaz", "Torres", "Gutiérrez", "Ruiz", "Mendoza",
            "Aguilar", "Ortiz", "Castillo",
        ]),
        street_prefixes: owned(&[
            "Calle", "Avenida", "Boulevard", "Privada", "Callejón", "Calzada", "Andador",
            "Cerrada",
        ]),
        street_names: owned(&[
            "Hidalgo", "Juárez", "Morelos", "Reforma", "Insurgentes", "Madero",
            "Zaragoza", "Allende", "Independencia", "Revolución", "Constitución",
            "Guerrero", "Matamoros", "Álvaro Obregón", "Benito Juárez", "Emiliano Zapata",
            "Venustiano Carranza", "Niños Héroes", "Cinco de Mayo", "Lázaro Cárdenas",
        ]),
        street_suffixes: Vec::new(),
        building_numbers: owned(&["#", "##", "###", "####", "### Interior ##"]),
        cities: owned(&[
            "Guadalajara", "Monterrey", "Puebla", "Tijuana", "León", "Zapopan",
            "Mérida", "Querétaro", "Aguascalientes", "Toluca", "Morelia", "Chihuahua",
            "Hermosillo", "Saltillo", "Culiacán", "Oaxaca de Juárez", "Cancún",
            "Veracruz", "Acapulco", "San Luis Potosí",
        ]),
        regions: owned(&[
            "Aguascalientes", "Baja California", "Campeche", "Chiapas", "Chihuahua",
            "Coahuila", "Colima", "Durango", "Guanajuato", "Guerrero", "Hidalgo",
            "Jalisco", "Estado de México", "Michoacán", "Morelos", "Nayarit",
            "Nuevo León", "Oaxaca", "Puebla", "Querétaro", "Quintana Roo",
            "San Luis Potosí", "Sinaloa", "Sonora", "Tabasco", "Tamaulipas", "Tlaxcala",
            "Veracruz", "Yucatán", "Zacatecas",
        ]),
        postcodes: Vec::new(),
        phone_format: "+52-###-###-####".to_string(),
    }
}

fn en_us() -> LocaleData {
    LocaleData {
        first_names: owned(&[
            "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
            "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph",
            "Jessica", "Thomas", "Sarah", "Christopher", "Karen", "Daniel", "Nancy",
            "Matthew", "Emily",
        ]),
        middle_names: owned(&[
            "Lee", "Ann", "Marie", "Ray", "Lynn", "Allen", "Jean", "Wayne", "Rose",
            "Edward", "Grace", "Dean", "Louise", "Scott", "Mae", "Paul",
        ]),
        last_names: owned(&[
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson",
            "Anderson", "Taylor", "Thomas", "Moore", "Jackson", "Martin", "Thompson",
            "White", "Harris", "Clark", "Lewis", "Robinson", "Walker", "Young", "Allen",
            "King",
        ]),
        street_prefixes: Vec::new(),
        street_names: owned(&[
            "Maple", "Oak", "Washington", "Lake", "Hill", "Park", "Pine", "Cedar", "Elm",
            "Sunset", "Lincoln", "Highland", "Jefferson", "Madison", "Franklin", "River",
            "Chestnut", "Spring", "Walnut", "Meadow",
        ]),
        street_suffixes: owned(&[
            "Street", "Avenue", "Road", "Boulevard", "Drive", "Lane", "Court", "Place",
            "Way", "Terrace", "Parkway", "Circle",
        ]),
        building_numbers: owned(&["###", "####", "#####"]),
        cities: owned(&[
            "Springfield", "Riverside", "Franklin", "Greenville", "Bristol", "Clinton",
            "Fairview", "Salem", "Madison", "Georgetown", "Arlington", "Ashland",
            "Dover", "Oxford", "Jackson", "Burlington", "Manchester", "Milton",
            "Newport", "Auburn",
        ]),
        regions: owned(&[
            "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL",
            "IN", "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT",
            "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI",
            "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
        ]),
        postcodes: owned(&["#####"]),
        phone_format: "(+1) ###-###-####".to_string(),
    }
}

fn en_gb() -> LocaleData {
    LocaleData {
        first_names: owned(&[
            "Oliver", "Amelia", "George", "Isla", "Harry", "Ava", "Jack", "Emily",
            "Charlie", "Sophie", "Thomas", "Grace", "Oscar", "Lily", "William", "Freya",
            "James", "Ella", "Alfie", "Poppy", "Henry", "Evie", "Arthur", "Florence",
        ]),
        middle_names: owned(&[
            "James", "Rose", "Edward", "Mae", "Alexander", "Louise", "Robert", "Grace",
            "David", "Elizabeth", "John", "Victoria", "Charles", "Anne", "Peter",
            "Catherine",
        ]),
        last_names: owned(&[
            "Smith", "Jones", "Taylor", "Brown", "Williams", "Wilson", "Johnson",
            "Davies", "Robinson", "Wright", "Thompson", "Evans", "Walker", "White",
            "Roberts", "Green", "Hall", "Wood", "Jackson", "Clarke", "Hughes", "Edwards",
            "Turner", "Hill",
        ]),
        street_prefixes: Vec::new(),
        street_names: owned(&[
            "Church", "Station", "Victoria", "Mill", "Park", "Queens", "Kings", "Manor",
            "School", "Grange", "Orchard", "Chapel", "Windsor", "Highfield", "Springfield",
            "Alexandra", "Richmond", "York", "Albert", "Meadow",
        ]),
        street_suffixes: owned(&[
            "Road", "Street", "Lane", "Close", "Avenue", "Drive", "Gardens", "Crescent",
            "Way", "Place", "Terrace", "Grove",
        ]),
        building_numbers: owned(&["#", "##", "###"]),
        cities: owned(&[
            "London", "Birmingham", "Manchester", "Leeds", "Sheffield", "Bristol",
            "Liverpool", "Nottingham", "Leicester", "Coventry", "Bradford", "Reading",
            "Norwich", "Exeter", "York", "Cambridge", "Oxford", "Brighton", "Bath",
            "Plymouth",
        ]),
        regions: owned(&[
            "Bedfordshire", "Berkshire", "Buckinghamshire", "Cambridgeshire", "Cheshire",
            "Cornwall", "Cumbria", "Derbyshire", "Devon", "Dorset", "Durham", "Essex",
            "Gloucestershire", "Hampshire", "Hertfordshire", "Kent", "Lancashire",
            "Leicestershire", "Lincolnshire", "Norfolk", "Northamptonshire",
            "Nottinghamshire", "Oxfordshire", "Shropshire", "Somerset", "Staffordshire",
            "Suffolk", "Surrey", "Warwickshire", "Wiltshire",
        ]),
        postcodes: owned(&["??# #??", "??## #??", "?# #??", "?## #??"]),
        phone_format: "+44 #### ######".to_string(),
    }
}
