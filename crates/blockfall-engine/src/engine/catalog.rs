use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;

use crate::{
    ConfigError,
    core::shape::{Shape, ShapeKind},
};

/// Seed for a deterministic shape sequence.
///
/// A 128-bit (16-byte) seed initializing the random number generator behind
/// [`ShapeCatalog::pick_random`]. The same seed produces the same sequence
/// of shapes, enabling reproducible sessions and deterministic tests. The
/// textual form is a 32-character hex string.
///
/// # Example
///
/// ```
/// use blockfall_engine::{CatalogSeed, ShapeCatalog};
/// use rand::Rng as _;
///
/// let seed: CatalogSeed = rand::rng().random();
///
/// let mut catalog1 = ShapeCatalog::standard_with_seed(seed);
/// let mut catalog2 = ShapeCatalog::standard_with_seed(seed);
///
/// assert_eq!(catalog1.pick_random(), catalog2.pick_random());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CatalogSeed([u8; 16]);

/// Error parsing a [`CatalogSeed`] from its hex form.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid catalog seed: expected 32 hex characters")]
pub struct ParseSeedError;

impl fmt::Display for CatalogSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for CatalogSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `CatalogSeed` values with `rng.random()`.
impl Distribution<CatalogSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CatalogSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        CatalogSeed(seed)
    }
}

/// The fixed set of piece shapes and the random source that draws from it.
///
/// Every draw is uniform over the set and independent of earlier draws -
/// there is no bag or repeat-avoidance scheme, so droughts and repeats are
/// possible by design.
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
    rng: Pcg32,
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShapeCatalog {
    /// Creates a catalog of the seven canonical shapes with a random seed.
    #[must_use]
    pub fn standard() -> Self {
        Self::standard_with_seed(rand::rng().random())
    }

    /// Like [`Self::standard`], but with a specific seed for a
    /// deterministic shape sequence.
    #[must_use]
    pub fn standard_with_seed(seed: CatalogSeed) -> Self {
        Self {
            shapes: ShapeKind::ALL.iter().copied().map(Shape::canonical).collect(),
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Creates a catalog over a custom shape set. An empty set is rejected.
    pub fn with_shapes(shapes: Vec<Shape>, seed: CatalogSeed) -> Result<Self, ConfigError> {
        if shapes.is_empty() {
            return Err(ConfigError::EmptyShapeSet);
        }
        Ok(Self {
            shapes,
            rng: Pcg32::from_seed(seed.0),
        })
    }

    /// The shapes this catalog draws from.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Draws one shape uniformly at random, independent across calls.
    pub fn pick_random(&mut self) -> Shape {
        let index = self.rng.random_range(0..self.shapes.len());
        self.shapes[index]
    }
}
