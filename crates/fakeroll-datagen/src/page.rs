//! Page geometry and record assembly.

use crate::error::GenerationError;
use crate::fields::generate_fields;
use crate::locale::LocaleCatalog;
use crate::record::Record;
use crate::region::Region;
use crate::request::GenerationRequest;
use crate::rng::RecordStreams;
use crate::typos::{inject_errors, ErrorRate};
use std::num::NonZeroU32;
use std::ops::Range;
use std::sync::Arc;

/// Records on the first page.
pub const FIRST_PAGE_SIZE: u64 = 20;

/// Records on every later page.
pub const PAGE_SIZE: u64 = 10;

/// Number of records on `page`.
pub fn records_per_page(page: NonZeroU32) -> u64 {
    if page.get() == 1 {
        FIRST_PAGE_SIZE
    } else {
        PAGE_SIZE
    }
}

/// Global index of the first record on `page`.
pub fn start_index(page: NonZeroU32) -> u64 {
    if page.get() == 1 {
        1
    } else {
        FIRST_PAGE_SIZE + (page.get() as u64 - 2) * PAGE_SIZE + 1
    }
}

/// The global indices covered by `page`.
pub fn page_indices(page: NonZeroU32) -> Range<u64> {
    let start = start_index(page);
    start..start + records_per_page(page)
}

/// Builds records from a shared, read-only locale catalog.
///
/// Cheap to clone; every call derives its own random streams, so one
/// generator can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    catalog: Arc<LocaleCatalog>,
}

impl RecordGenerator {
    pub fn new(catalog: LocaleCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Generator over the built-in locale tables.
    pub fn builtin() -> Self {
        Self::new(LocaleCatalog::builtin())
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// Generate a single record.
    pub fn generate_record(
        &self,
        region: Region,
        seed: &str,
        index: u64,
        errors_per_record: ErrorRate,
    ) -> Result<Record, GenerationError> {
        let mut streams = RecordStreams::derive(seed, index);
        let data = self.catalog.get(region.locale());

        let mut fields = generate_fields(region, data, &mut streams.fields)?;
        let typos = inject_errors(
            &mut fields,
            errors_per_record,
            &mut streams.errors,
            region.alphabet(),
        );
        tracing::trace!(index, typos = typos.len(), "generated record");

        Ok(Record::new(index, fields))
    }

    /// Lazily generate the records of one page.
    pub fn page(&self, request: &GenerationRequest) -> PageIter<'_> {
        PageIter {
            generator: self,
            region: request.region,
            seed: request.seed.clone(),
            errors_per_record: request.errors_per_record,
            indices: page_indices(request.page_number),
        }
    }

    /// Generate one page. Records that fail are logged and left out.
    pub fn generate_page(&self, request: &GenerationRequest) -> Vec<Record> {
        let records: Vec<Record> = self.page(request).collect();
        tracing::debug!(
            region = %request.region,
            page = request.page_number.get(),
            records = records.len(),
            "generated page"
        );
        records
    }

    /// Pages `1..=pages` concatenated, as a client scrolling that far would
    /// hold them.
    pub fn generate_pages(&self, request: &GenerationRequest, pages: NonZeroU32) -> Vec<Record> {
        let mut records = Vec::new();
        for page in 1..=pages.get() {
            if let Some(page) = NonZeroU32::new(page) {
                records.extend(self.page(&request.with_page(page)));
            }
        }
        records
    }
}

impl Default for RecordGenerator {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Records of one page in ascending index order.
///
/// Not restartable: it is consumed as it goes. A new iterator recomputes the
/// same records from scratch.
pub struct PageIter<'a> {
    generator: &'a RecordGenerator,
    region: Region,
    seed: String,
    errors_per_record: ErrorRate,
    indices: Range<u64>,
}

impl Iterator for PageIter<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let Self {
            generator,
            region,
            seed,
            errors_per_record,
            indices,
        } = self;
        next_generated(indices, |index| {
            generator.generate_record(*region, seed.as_str(), index, *errors_per_record)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.indices.end.saturating_sub(self.indices.start) as usize))
    }
}

/// Advance `indices` to the first index that generates, logging and
/// skipping the ones that fail.
fn next_generated<F>(indices: &mut Range<u64>, mut generate: F) -> Option<Record>
where
    F: FnMut(u64) -> Result<Record, GenerationError>,
{
    for index in indices.by_ref() {
        match generate(index) {
            Ok(record) => return Some(record),
            Err(err) => {
                tracing::error!(index, error = %err, "failed to generate record, skipping");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Locale, LocaleOverride};
    use std::collections::HashMap;

    fn page(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn request(region: Region, rate: f64, seed: &str, n: u32) -> GenerationRequest {
        GenerationRequest::new(region, ErrorRate::new(rate).unwrap(), seed, page(n))
    }

    #[test]
    fn test_page_geometry() {
        assert_eq!(page_indices(page(1)), 1..21);
        assert_eq!(page_indices(page(2)), 21..31);
        assert_eq!(page_indices(page(3)), 31..41);
        assert_eq!(page_indices(page(10)), 101..111);
    }

    #[test]
    fn test_pages_are_contiguous() {
        for n in 1..50 {
            assert_eq!(page_indices(page(n)).end, page_indices(page(n + 1)).start);
        }
    }

    #[test]
    fn test_largest_page_does_not_overflow() {
        let last = page_indices(page(u32::MAX));
        assert_eq!(last.end - last.start, PAGE_SIZE);
    }

    #[test]
    fn test_generate_page_indices() {
        let gen = RecordGenerator::builtin();

        let first = gen.generate_page(&request(Region::Mexico, 0.0, "s", 1));
        let indices: Vec<u64> = first.iter().map(|r| r.index).collect();
        assert_eq!(indices, (1..=20).collect::<Vec<u64>>());

        let second = gen.generate_page(&request(Region::Mexico, 0.0, "s", 2));
        let indices: Vec<u64> = second.iter().map(|r| r.index).collect();
        assert_eq!(indices, (21..=30).collect::<Vec<u64>>());
    }

    #[test]
    fn test_generate_page_is_deterministic() {
        let gen1 = RecordGenerator::builtin();
        let gen2 = RecordGenerator::builtin();
        for region in Region::ALL {
            let req = request(region, 3.4, "determinism", 4);
            assert_eq!(gen1.generate_page(&req), gen2.generate_page(&req));
        }
    }

    #[test]
    fn test_record_independent_of_page() {
        // Index 25 is on page 2; generating it alone must give the same record.
        let gen = RecordGenerator::builtin();
        let req = request(Region::GreatBritain, 1.5, "solo", 2);
        let from_page = gen.generate_page(&req).into_iter().find(|r| r.index == 25).unwrap();
        let alone = gen
            .generate_record(Region::GreatBritain, "solo", 25, req.errors_per_record)
            .unwrap();
        assert_eq!(from_page, alone);
    }

    #[test]
    fn test_error_rate_does_not_change_identifier() {
        let gen = RecordGenerator::builtin();
        let clean = gen.generate_page(&request(Region::UnitedStates, 0.0, "ids", 1));
        let noisy = gen.generate_page(&request(Region::UnitedStates, 5.0, "ids", 1));
        for (c, n) in clean.iter().zip(&noisy) {
            assert_eq!(c.identifier, n.identifier);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let gen = RecordGenerator::builtin();
        let a = gen.generate_page(&request(Region::UnitedStates, 0.0, "a", 1));
        let b = gen.generate_page(&request(Region::UnitedStates, 0.0, "b", 1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_failed_records_are_skipped() {
        let mut overrides = HashMap::new();
        overrides.insert(
            Locale::EnGb,
            LocaleOverride {
                cities: Some(Vec::new()),
                ..Default::default()
            },
        );
        let gen = RecordGenerator::new(LocaleCatalog::with_overrides(overrides));

        assert!(gen.generate_page(&request(Region::GreatBritain, 0.0, "s", 1)).is_empty());
        assert_eq!(gen.generate_page(&request(Region::Mexico, 0.0, "s", 1)).len(), 20);
    }

    #[test]
    fn test_partial_failures_keep_remaining_order() {
        let gen = RecordGenerator::builtin();
        let req = request(Region::UnitedStates, 1.0, "gaps", 1);
        let mut indices = page_indices(req.page_number);

        let mut kept = Vec::new();
        while let Some(record) = next_generated(&mut indices, |index| {
            if index % 3 == 0 {
                Err(GenerationError::empty_table(Locale::EnUs, "cities"))
            } else {
                gen.generate_record(req.region, &req.seed, index, req.errors_per_record)
            }
        }) {
            kept.push(record);
        }

        let kept_indices: Vec<u64> = kept.iter().map(|r| r.index).collect();
        let expected: Vec<u64> = (1..=20).filter(|i| i % 3 != 0).collect();
        assert_eq!(kept_indices, expected);

        let full = gen.generate_page(&req);
        for record in &kept {
            assert!(full.contains(record));
        }
    }

    #[test]
    fn test_max_error_rate_completes_page() {
        let gen = RecordGenerator::builtin();
        let req = GenerationRequest::new(Region::Mexico, ErrorRate::MAX, "heavy", page(1));
        assert_eq!(gen.generate_page(&req).len(), 20);
    }

    #[test]
    fn test_generate_pages_concatenates() {
        let gen = RecordGenerator::builtin();
        let req = request(Region::Mexico, 0.5, "many", 1);
        let records = gen.generate_pages(&req, page(3));
        assert_eq!(records.len(), 40);
        assert_eq!(records.first().unwrap().index, 1);
        assert_eq!(records.last().unwrap().index, 40);
        assert_eq!(&records[20..30], gen.generate_page(&req.with_page(page(2))).as_slice());
    }
}
