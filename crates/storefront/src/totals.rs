//! Cart totals: cart lines joined with catalog prices.
//!
//! Recomputed from scratch whenever the cart is rendered; nothing here is
//! cached or persisted. Lines whose product is no longer in the catalog
//! (stale persisted references) contribute nothing to the subtotal and are
//! not listed.

use dariy_core::{CurrencyCode, Price};

use crate::catalog::{Catalog, Product};
use crate::store::{CartState, LineKey};

/// Badge counts above this are shown as `99+`.
const BADGE_MAX: u64 = 99;

/// Header badge text for `count`: empty for zero, `99+` for large counts.
#[must_use]
pub fn badge(count: u64) -> String {
    match count {
        0 => String::new(),
        n if n > BADGE_MAX => format!("{BADGE_MAX}+"),
        n => n.to_string(),
    }
}

/// A cart line resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine<'a> {
    pub product: &'a Product,
    pub key: LineKey,
    pub qty: u32,
    /// `product.price × qty`
    pub line_total: Price,
}

impl SummaryLine<'_> {
    /// "Size, color" caption, or `None` when the line has neither.
    #[must_use]
    pub fn variant_caption(&self) -> Option<String> {
        let parts: Vec<&str> = [self.key.size(), self.key.color()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary<'a> {
    pub lines: Vec<SummaryLine<'a>>,
    /// Σ price × qty over lines found in the catalog.
    pub subtotal: Price,
    /// Σ qty over all cart lines.
    pub total_items: u32,
}

impl<'a> CartSummary<'a> {
    /// Join `cart` with `catalog`.
    #[must_use]
    pub fn compute(cart: &CartState, catalog: &'a Catalog) -> Self {
        let lines: Vec<SummaryLine<'a>> = cart
            .lines()
            .iter()
            .filter_map(|line| {
                let Some(product) = catalog.get(line.id.as_str()) else {
                    tracing::debug!(product_id = %line.id, "Cart line references unknown product");
                    return None;
                };
                Some(SummaryLine {
                    product,
                    key: line.key(),
                    qty: line.qty,
                    line_total: product.price.times(line.qty),
                })
            })
            .collect();

        let subtotal = lines.iter().map(|line| line.line_total).sum();

        Self {
            lines,
            subtotal,
            total_items: cart.total_items(),
        }
    }

    /// Returns `true` if no line resolved against the catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Header badge text: empty for zero, `99+` for large counts.
    #[must_use]
    pub fn badge(&self) -> String {
        badge(u64::from(self.total_items))
    }

    /// Summary heading, e.g. `Итого (3 товара): 2 200 ₽`.
    #[must_use]
    pub fn heading(&self) -> String {
        let noun = if self.total_items == 1 {
            "товар"
        } else {
            "товара"
        };
        format!(
            "Итого ({} {noun}): {}",
            self.total_items,
            self.subtotal.display(CurrencyCode::default())
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::store::AddOptions;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": "p1", "title": "Платье", "price": 500, "sizes": ["M"]},
                {"id": "p2", "title": "Худи", "price": 1200, "colors": ["black"]},
                {"id": "p3", "title": "Шарф", "price": 0}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_subtotal_and_count() {
        let catalog = catalog();
        let mut cart = CartState::default();
        cart.add("p1".into(), AddOptions::new().qty(2));
        cart.add("p2".into(), AddOptions::new());

        let summary = CartSummary::compute(&cart, &catalog);
        assert_eq!(summary.subtotal, Price::new(2200));
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.lines[0].line_total, Price::new(1000));
        assert_eq!(summary.heading(), "Итого (3 товара): 2\u{a0}200\u{a0}₽");
    }

    #[test]
    fn test_stale_lines_contribute_zero() {
        let catalog = catalog();
        let mut cart = CartState::default();
        cart.add("p1".into(), AddOptions::new());
        cart.add("removed-from-catalog".into(), AddOptions::new().qty(4));

        let summary = CartSummary::compute(&cart, &catalog);
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.subtotal, Price::new(500));
        assert_eq!(summary.total_items, 5);
    }

    #[test]
    fn test_empty_cart() {
        let catalog = catalog();
        let summary = CartSummary::compute(&CartState::default(), &catalog);
        assert!(summary.is_empty());
        assert_eq!(summary.subtotal, Price::ZERO);
        assert_eq!(summary.badge(), "");
    }

    #[test]
    fn test_singular_heading_and_badge() {
        let catalog = catalog();
        let mut cart = CartState::default();
        cart.add("p2".into(), AddOptions::new().color("black"));
        let summary = CartSummary::compute(&cart, &catalog);
        assert_eq!(summary.heading(), "Итого (1 товар): 1\u{a0}200\u{a0}₽");
        assert_eq!(summary.badge(), "1");
        assert_eq!(summary.lines[0].variant_caption().as_deref(), Some("black"));

        cart.add("p2".into(), AddOptions::new().color("black").qty(150));
        assert_eq!(CartSummary::compute(&cart, &catalog).badge(), "99+");
    }

    #[test]
    fn test_badge_bounds() {
        assert_eq!(badge(0), "");
        assert_eq!(badge(1), "1");
        assert_eq!(badge(99), "99");
        assert_eq!(badge(100), "99+");
    }

    #[test]
    fn test_variant_caption() {
        let catalog = catalog();
        let mut cart = CartState::default();
        cart.add("p1".into(), AddOptions::new().size("M").color("red"));
        cart.add("p3".into(), AddOptions::new());
        let summary = CartSummary::compute(&cart, &catalog);
        assert_eq!(summary.lines[0].variant_caption().as_deref(), Some("M, red"));
        assert_eq!(summary.lines[1].variant_caption(), None);
    }
}
