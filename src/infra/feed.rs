//! Fixed external product feed.
//!
//! The storefront merges a third-party catalog feed into the local one.
//! The feed is a fixed snapshot bundled with the application; feed IDs
//! are raw (un-offset) here and shifted by `FEED_ID_OFFSET` when they
//! enter the merged catalog.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

/// One item of the external feed snapshot
#[derive(Debug, Clone)]
pub struct FeedProduct {
    /// Raw feed identifier (before the catalog offset is applied)
    pub id: i32,
    pub title: &'static str,
    pub price: Decimal,
    pub category: &'static str,
    pub image: &'static str,
    pub description: &'static str,
}

static FEED: Lazy<Vec<FeedProduct>> = Lazy::new(|| {
    vec![
        FeedProduct {
            id: 1,
            title: "Fjallraven Foldsack No. 1 Backpack",
            price: Decimal::new(10995, 2),
            category: "men's clothing",
            image: "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            description: "Fits 15 inch laptops, everyday carry.",
        },
        FeedProduct {
            id: 2,
            title: "Mens Casual Premium Slim Fit T-Shirt",
            price: Decimal::new(2230, 2),
            category: "men's clothing",
            image: "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            description: "Slim-fitting style, contrast raglan long sleeve.",
        },
        FeedProduct {
            id: 3,
            title: "Mens Cotton Jacket",
            price: Decimal::new(5599, 2),
            category: "men's clothing",
            image: "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg",
            description: "Great outerwear jacket for spring and autumn.",
        },
        FeedProduct {
            id: 4,
            title: "Womens 3-in-1 Snowboard Jacket",
            price: Decimal::new(5699, 2),
            category: "women's clothing",
            image: "https://fakestoreapi.com/img/51Y5NI-I5jL._AC_UX679_.jpg",
            description: "Detachable liner, stand collar, zippered pockets.",
        },
        FeedProduct {
            id: 5,
            title: "John Hardy Legends Naga Bracelet",
            price: Decimal::new(69500, 2),
            category: "jewelery",
            image: "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            description: "Gold and silver dragon station chain bracelet.",
        },
        FeedProduct {
            id: 6,
            title: "Solid Gold Petite Micropave Ring",
            price: Decimal::new(16800, 2),
            category: "jewelery",
            image: "https://fakestoreapi.com/img/61sbMiUnoGL._AC_UL640_QL65_ML3_.jpg",
            description: "Satisfaction guaranteed, designed in the USA.",
        },
        FeedProduct {
            id: 7,
            title: "WD 2TB Elements Portable External Hard Drive",
            price: Decimal::new(6400, 2),
            category: "electronics",
            image: "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            description: "USB 3.0 and USB 2.0 compatibility, fast data transfers.",
        },
        FeedProduct {
            id: 8,
            title: "Acer SB220Q 21.5 inch Full HD IPS Monitor",
            price: Decimal::new(59900, 2),
            category: "electronics",
            image: "https://fakestoreapi.com/img/81QpkIctqPL._AC_SX679_.jpg",
            description: "Ultra-thin zero-frame 1080p display, 75Hz refresh.",
        },
    ]
});

/// All feed items, in feed order.
pub fn all() -> &'static [FeedProduct] {
    &FEED
}

/// Look up a feed item by its raw (un-offset) identifier.
pub fn find(raw_id: i32) -> Option<&'static FeedProduct> {
    FEED.iter().find(|p| p.id == raw_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_resolves_raw_ids_only() {
        assert!(find(1).is_some());
        assert!(find(999).is_none());
        // Offset IDs never match the raw feed
        assert!(find(1001).is_none());
    }
}
