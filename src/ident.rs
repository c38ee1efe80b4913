//! Collision-free random part identifiers.
//!
//! Each entity family (corners, polygons, edges) draws from its own pool, so
//! identifiers are unique only within a family. Values are randomized because
//! they end up printed on physical part labels; a dense sequential numbering
//! would make mislabeled parts hard to notice.

use std::collections::HashSet;

use rand::Rng;

use crate::error::IdentError;

/// Smallest identifier a pool will issue.
pub const MIN_PART_ID: u16 = 1;

/// Largest identifier a pool will issue.
///
/// 0 and 32767 are excluded: they are not reliably distinguishable by the
/// downstream barcode/QR rendering.
pub const MAX_PART_ID: u16 = 32766;

/// Issues uniform-random identifiers in `[MIN_PART_ID, MAX_PART_ID]`,
/// retrying on collision against everything the pool already issued.
#[derive(Debug)]
pub struct IdentPool {
    family: &'static str,
    issued: HashSet<u16>,
}

impl IdentPool {
    /// Creates an empty pool for the named entity family.
    #[must_use]
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            issued: HashSet::new(),
        }
    }

    /// Draws a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentError::PoolExhausted`] once every value in the range
    /// has been issued; without this check the retry loop would never
    /// terminate.
    pub fn next<R: Rng>(&mut self, rng: &mut R) -> Result<u16, IdentError> {
        let range_len = usize::from(MAX_PART_ID - MIN_PART_ID) + 1;
        if self.issued.len() >= range_len {
            return Err(IdentError::PoolExhausted {
                family: self.family,
                issued: self.issued.len(),
            });
        }

        loop {
            let id = rng.gen_range(MIN_PART_ID..=MAX_PART_ID);
            if self.issued.insert(id) {
                return Ok(id);
            }
        }
    }

    /// Number of identifiers issued so far.
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn issues_unique_ids_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = IdentPool::new("corner");
        let mut seen = HashSet::new();

        for _ in 0..1000 {
            let id = pool.next(&mut rng).unwrap();
            assert!((MIN_PART_ID..=MAX_PART_ID).contains(&id));
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pool = IdentPool::new("edge");
            (0..16)
                .map(|_| pool.next(&mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn exhausted_pool_fails_explicitly() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = IdentPool::new("corner");

        let range_len = usize::from(MAX_PART_ID - MIN_PART_ID) + 1;
        for _ in 0..range_len {
            pool.next(&mut rng).unwrap();
        }

        assert!(matches!(
            pool.next(&mut rng),
            Err(IdentError::PoolExhausted { family: "corner", .. })
        ));
    }
}
