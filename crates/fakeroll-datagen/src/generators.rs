//! Field generators and the combinators that chain them.
//!
//! A generator holds no random state of its own: it draws from the
//! record-scoped source it is handed, so the same source always yields the
//! same value.

use rand::RngCore;
use uuid::Uuid;

/// Produces one value per call from a random source.
pub trait Gen {
    type Output;

    fn generate(&self, rng: &mut dyn RngCore) -> Self::Output;

    /// Transform each generated value.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { inner: self, f }
    }

    /// Feed each generated value into `f` and run the generator it returns.
    /// The outer draw always happens before the inner one.
    fn then<H, F>(self, f: F) -> Then<Self, F>
    where
        Self: Sized,
        H: Gen,
        F: Fn(Self::Output) -> H,
    {
        Then { outer: self, f }
    }
}

pub struct Map<G, F> {
    inner: G,
    f: F,
}

impl<G, U, F> Gen for Map<G, F>
where
    G: Gen,
    F: Fn(G::Output) -> U,
{
    type Output = U;

    fn generate(&self, rng: &mut dyn RngCore) -> U {
        (self.f)(self.inner.generate(rng))
    }
}

pub struct Then<G, F> {
    outer: G,
    f: F,
}

impl<G, H, F> Gen for Then<G, F>
where
    G: Gen,
    H: Gen,
    F: Fn(G::Output) -> H,
{
    type Output = H::Output;

    fn generate(&self, rng: &mut dyn RngCore) -> H::Output {
        (self.f)(self.outer.generate(rng)).generate(rng)
    }
}

/// Generate a value uniformly selected from a non-empty slice.
///
/// The choice is `next_u64() % len`, which keeps the draw count at exactly
/// one per pick.
pub struct OneOf<'a, T> {
    items: &'a [T],
}

impl<'a, T: Clone> OneOf<'a, T> {
    /// Returns `None` for an empty slice.
    pub fn new(items: &'a [T]) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }
}

impl<T: Clone> Gen for OneOf<'_, T> {
    type Output = T;

    fn generate(&self, rng: &mut dyn RngCore) -> T {
        let idx = (rng.next_u64() % self.items.len() as u64) as usize;
        self.items[idx].clone()
    }
}

/// Convenience function to create a one-of generator.
pub fn one_of<T: Clone>(items: &[T]) -> Option<OneOf<'_, T>> {
    OneOf::new(items)
}

/// Fill a template: `#` becomes a decimal digit, `?` an uppercase ASCII
/// letter. Every other character is copied through.
pub struct Pattern {
    template: String,
}

impl Pattern {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Gen for Pattern {
    type Output = String;

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        self.template
            .chars()
            .map(|ch| match ch {
                '#' => char::from(b'0' + (rng.next_u32() % 10) as u8),
                '?' => char::from(b'A' + (rng.next_u32() % 26) as u8),
                other => other,
            })
            .collect()
    }
}

/// Convenience function to create a pattern generator.
pub fn pattern(template: impl Into<String>) -> Pattern {
    Pattern::new(template)
}

/// Generate a deterministic UUID from random bytes.
pub struct UuidGen;

impl Gen for UuidGen {
    type Output = Uuid;

    fn generate(&self, rng: &mut dyn RngCore) -> Uuid {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        // Set version 4 (random) bits
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        // Set variant bits
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        Uuid::from_bytes(bytes)
    }
}

/// Convenience function to create a UUID generator.
pub fn uuid_gen() -> UuidGen {
    UuidGen
}
