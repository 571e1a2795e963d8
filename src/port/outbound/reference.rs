//! Reference price lookup port used when the market path fails.

/// Static table of known device prices.
pub trait ReferencePrices: Send + Sync {
    /// Look up a reference price. `brand` narrows the match when given.
    fn lookup(&self, brand: Option<&str>, marketing_name: &str) -> Option<u64>;

    /// Number of devices with a known price.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
