use fairprice::adapter::outbound::reference::PriceBook;

/// Small reference table covering the devices used across tests.
pub fn price_book() -> PriceBook {
    PriceBook::from_entries([
        ("Samsung", "Galaxy S24", 13_999_000),
        ("Samsung", "Galaxy A15", 2_699_000),
        ("Apple", "iPhone 15", 14_999_000),
    ])
}
