use serde::Deserialize;

const DEFAULT_COUNT: u64 = 100;
const MAX_COUNT: u64 = 100;
/// Largest row offset the database accepts.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination query parameters.
///
/// `skip` is a page index, not a row offset: page `skip` of size `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_count")]
    pub count: u64,
}

fn default_count() -> u64 {
    DEFAULT_COUNT
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            count: DEFAULT_COUNT,
        }
    }
}

impl Page {
    pub fn new(skip: u64, count: u64) -> Self {
        Self { skip, count }
    }

    /// Page size clamped to `1..=100`.
    pub fn size(&self) -> u64 {
        self.count.clamp(1, MAX_COUNT)
    }

    /// Page index to fetch, lowered so that `index * size` stays a valid row offset.
    ///
    /// Any index past the last row yields an empty page, so lowering an out of range
    /// index does not change the result.
    pub fn index(&self) -> u64 {
        self.skip.min(MAX_OFFSET / self.size())
    }
}
