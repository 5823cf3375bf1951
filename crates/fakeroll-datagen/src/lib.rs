//! Deterministic generation of fake, localized personal records.
//!
//! Given a region, a seed string, a page number and an error rate, the
//! generator always returns the same records with the same typos. Each
//! record draws from two random streams derived from `"{seed}-{index}"`:
//! one for the clean fields, one for typo injection.
//!
//! # Quick Start
//!
//! ```rust
//! use fakeroll_datagen::{ErrorRate, GenerationRequest, RecordGenerator, Region};
//! use std::num::NonZeroU32;
//!
//! let generator = RecordGenerator::builtin();
//! let request = GenerationRequest::new(
//!     Region::Mexico,
//!     ErrorRate::new(1.5).unwrap(),
//!     "default-seed",
//!     NonZeroU32::new(1).unwrap(),
//! );
//!
//! let records = generator.generate_page(&request);
//! assert_eq!(records.len(), 20);
//! assert_eq!(records[0].index, 1);
//! ```
//!
//! # From query parameters
//!
//! ```rust
//! use fakeroll_datagen::{GenerationRequest, RawRequest, RecordGenerator, RequestLimits};
//!
//! let raw = RawRequest {
//!     region: Some("Great_Britain".into()),
//!     errors_per_record: Some("0".into()),
//!     seed: Some("abc".into()),
//!     page_number: Some("2".into()),
//! };
//! let request = GenerationRequest::parse(&raw, &RequestLimits::default()).unwrap();
//! let records = RecordGenerator::builtin().generate_page(&request);
//! assert_eq!(records.first().map(|r| r.index), Some(21));
//! ```

pub mod error;
pub mod export;
pub mod fields;
pub mod generators;
pub mod locale;
pub mod page;
pub mod record;
pub mod region;
pub mod request;
pub mod rng;
pub mod typos;

pub use error::{GenerationError, LocaleFileError, RequestError};
pub use export::{to_csv_string, write_csv};
pub use fields::{generate_fields, RecordFields};
pub use generators::Gen;
pub use locale::{Locale, LocaleCatalog, LocaleData, LocaleOverride};
pub use page::{page_indices, records_per_page, start_index, PageIter, RecordGenerator};
pub use record::Record;
pub use region::Region;
pub use request::{GenerationRequest, RawRequest, RequestLimits};
pub use rng::{KeyedRng, RecordKey, RecordStreams};
pub use typos::{
    inject_errors, introduce_error, resolve_error_count, AppliedTypo, ErrorRate, Field, Typo,
    TypoKind,
};
