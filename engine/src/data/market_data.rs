// In-memory cache of fetched price series
use super::provider::DateRange;
use shared::models::PriceSeries;
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_MAX_ENTRIES: usize = 64;

type CacheKey = (String, DateRange);

/// Fetched series keyed by symbol and requested date range, holding at most
/// `max_entries` series. Once full, the oldest insertion is evicted first.
/// A range that ends today gets a new key when the date rolls over.
pub struct SeriesCache {
    data: HashMap<CacheKey, PriceSeries>,
    order: VecDeque<CacheKey>,
    max_entries: usize,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(max_entries: usize) -> Self {
        SeriesCache { data: HashMap::new(), order: VecDeque::new(), max_entries: max_entries.max(1) }
    }

    pub fn insert(&mut self, symbol: &str, range: DateRange, series: PriceSeries) {
        let key = (symbol.to_string(), range);
        if self.data.insert(key.clone(), series).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.max_entries {
            if let Some(oldest) = self.order.pop_front() {
                tracing::debug!(symbol = %oldest.0, start = %oldest.1.start, end = %oldest.1.end, "Evicting cached series");
                self.data.remove(&oldest);
            }
        }
    }

    pub fn get(&self, symbol: &str, range: &DateRange) -> Option<PriceSeries> {
        self.data.get(&(symbol.to_string(), *range)).cloned()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.order.clear();
    }
}

impl Default for SeriesCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(start_day: u32, end_day: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, end_day).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_keyed_by_symbol_and_range() {
        let mut cache = SeriesCache::new();
        assert!(cache.is_empty());
        cache.insert("GOOG", range(1, 10), PriceSeries::empty("GOOG"));

        assert!(cache.get("GOOG", &range(1, 10)).is_some());
        assert!(cache.get("GOOG", &range(1, 11)).is_none());
        assert!(cache.get("MSFT", &range(1, 10)).is_none());

        cache.insert("GOOG", range(1, 11), PriceSeries::empty("GOOG"));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest_first() {
        let mut cache = SeriesCache::with_capacity(3);
        for end in 1..=10 {
            cache.insert("GOOG", range(1, end), PriceSeries::empty("GOOG"));
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get("GOOG", &range(1, 7)).is_none());
        for end in 8..=10 {
            assert!(cache.get("GOOG", &range(1, end)).is_some());
        }
    }

    #[test]
    fn test_reinsert_does_not_grow() {
        let mut cache = SeriesCache::with_capacity(2);
        cache.insert("GOOG", range(1, 2), PriceSeries::empty("GOOG"));
        cache.insert("GOOG", range(1, 2), PriceSeries::empty("GOOG"));
        cache.insert("MSFT", range(1, 2), PriceSeries::empty("MSFT"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("GOOG", &range(1, 2)).is_some());
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache = SeriesCache::with_capacity(0);
        assert_eq!(cache.max_entries(), 1);
        cache.insert("GOOG", range(1, 2), PriceSeries::empty("GOOG"));
        cache.insert("GOOG", range(1, 3), PriceSeries::empty("GOOG"));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("GOOG", &range(1, 3)).is_some());
    }
}
