//! Typed, validated generation requests.

use crate::error::RequestError;
use crate::region::Region;
use crate::typos::ErrorRate;
use serde::Deserialize;
use std::num::NonZeroU32;

/// Upper bound on `errorsPerRecord` unless configured otherwise.
pub const DEFAULT_MAX_ERRORS_PER_RECORD: f64 = ErrorRate::MAX.value();

/// Query parameters exactly as received, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRequest {
    pub region: Option<String>,
    pub errors_per_record: Option<String>,
    pub seed: Option<String>,
    pub page_number: Option<String>,
}

/// Limits applied while parsing a [`RawRequest`].
///
/// `max_errors_per_record` can only tighten [`ErrorRate::MAX`]; a larger
/// value is treated as `ErrorRate::MAX`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestLimits {
    pub max_errors_per_record: f64,
}

impl RequestLimits {
    /// The effective `errorsPerRecord` ceiling.
    pub fn max_error_rate(&self) -> f64 {
        self.max_errors_per_record.min(ErrorRate::MAX.value())
    }
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_errors_per_record: DEFAULT_MAX_ERRORS_PER_RECORD,
        }
    }
}

/// One page request: which region, how many typos, which seed, which page.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub region: Region,
    pub errors_per_record: ErrorRate,
    pub seed: String,
    pub page_number: NonZeroU32,
}

impl GenerationRequest {
    pub fn new(
        region: Region,
        errors_per_record: ErrorRate,
        seed: impl Into<String>,
        page_number: NonZeroU32,
    ) -> Self {
        Self {
            region,
            errors_per_record,
            seed: seed.into(),
            page_number,
        }
    }

    /// Same request for another page.
    pub fn with_page(&self, page_number: NonZeroU32) -> Self {
        Self {
            page_number,
            ..self.clone()
        }
    }

    /// Validate raw parameters.
    ///
    /// `errorsPerRecord` and `pageNumber` are required. An absent or unknown
    /// region falls back to United States; an absent seed is the empty
    /// string.
    pub fn parse(raw: &RawRequest, limits: &RequestLimits) -> Result<Self, RequestError> {
        let region = Region::parse_lossy(raw.region.as_deref().unwrap_or_default());
        let errors_per_record = parse_error_rate(raw.errors_per_record.as_deref(), limits)?;
        let page_number = parse_page_number(raw.page_number.as_deref())?;
        let seed = raw.seed.clone().unwrap_or_default();

        Ok(Self {
            region,
            errors_per_record,
            seed,
            page_number,
        })
    }
}

fn parse_error_rate(value: Option<&str>, limits: &RequestLimits) -> Result<ErrorRate, RequestError> {
    const NAME: &str = "errorsPerRecord";

    let value = value.ok_or_else(|| RequestError::missing(NAME))?.trim();
    let rate: f64 = value
        .parse()
        .map_err(|_| RequestError::not_a_number(NAME, value))?;
    if !rate.is_finite() {
        return Err(RequestError::not_a_number(NAME, value));
    }
    if rate < 0.0 {
        return Err(RequestError::out_of_range(NAME, "must not be negative"));
    }
    let max = limits.max_error_rate();
    if rate > max {
        return Err(RequestError::out_of_range(
            NAME,
            format!("must be at most {max}"),
        ));
    }
    ErrorRate::new(rate).ok_or_else(|| RequestError::not_a_number(NAME, value))
}

fn parse_page_number(value: Option<&str>) -> Result<NonZeroU32, RequestError> {
    const NAME: &str = "pageNumber";

    let value = value.ok_or_else(|| RequestError::missing(NAME))?.trim();
    let page: u64 = value
        .parse()
        .map_err(|_| RequestError::not_a_number(NAME, value))?;
    let page = u32::try_from(page)
        .map_err(|_| RequestError::out_of_range(NAME, format!("must be at most {}", u32::MAX)))?;
    NonZeroU32::new(page).ok_or_else(|| RequestError::out_of_range(NAME, "must be at least 1"))
}
