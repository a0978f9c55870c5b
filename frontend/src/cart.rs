//! The shopping cart: an insertion-ordered set of lines keyed by product id.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::money::Money;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl CartLine {
    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image_url: product.image_url.clone(),
            description: product.description.clone(),
        }
    }

    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&CartStore)>;

#[derive(Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    revision: u64,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .finish()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted lines. Duplicate ids are merged and
    /// zero quantities dropped.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut store = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match store.position(&line.product_id) {
                Some(idx) => {
                    let merged = &mut store.lines[idx].quantity;
                    *merged = merged.saturating_add(line.quantity);
                }
                None => store.lines.push(line),
            }
        }
        store
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }

    fn changed(&mut self) {
        self.revision += 1;
        for (_, listener) in &self.listeners {
            listener(self);
        }
    }

    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        match self.position(&product.id) {
            Some(idx) => {
                let current = &mut self.lines[idx].quantity;
                *current = current.saturating_add(quantity);
            }
            None => self.lines.push(CartLine::from_product(product, quantity)),
        }
        self.changed();
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(idx) = self.position(product_id) {
            if self.lines[idx].quantity != quantity {
                self.lines[idx].quantity = quantity;
                self.changed();
            }
        }
    }

    pub fn remove_item(&mut self, product_id: &str) {
        if let Some(idx) = self.position(product_id) {
            self.lines.remove(idx);
            self.changed();
        }
    }

    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.changed();
        }
    }

    /// Saturates at `u32::MAX`.
    pub fn total_item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |total, l| total.saturating_add(l.quantity))
    }

    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bumped on every mutation that changed the lines.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: impl Fn(&CartStore) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::catalog::sample_product;

    #[test]
    fn adding_the_same_product_sums_quantities() {
        let a = sample_product("a", "A", 10_000, "X");
        let mut cart = CartStore::new();
        cart.add_item(&a, 1);
        cart.add_item(&a, 2);
        cart.add_item(&a, 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_item_count(), 4);
    }

    #[test]
    fn two_products_total_exactly() {
        let a = sample_product("a", "A", 10_000, "X");
        let b = sample_product("b", "B", 5_000, "X");
        let mut cart = CartStore::new();
        cart.add_item(&a, 2);
        cart.add_item(&b, 1);
        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price(), Money::from_cents(25_000));
        assert_eq!(cart.line("a").map(CartLine::subtotal), Some(Money::from_cents(20_000)));
    }

    #[test]
    fn total_price_does_not_depend_on_insertion_order() {
        let a = sample_product("a", "A", 1_999, "X");
        let b = sample_product("b", "B", 10, "X");
        let c = sample_product("c", "C", 33_333, "X");

        let mut first = CartStore::new();
        first.add_item(&a, 3);
        first.add_item(&b, 7);
        first.add_item(&c, 1);

        let mut second = CartStore::new();
        second.add_item(&c, 1);
        second.add_item(&b, 7);
        second.add_item(&a, 3);

        assert_eq!(first.total_price(), second.total_price());
        let ids: Vec<&str> = second.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn zero_quantity_is_the_same_as_removing() {
        let a = sample_product("a", "A", 100, "X");
        let b = sample_product("b", "B", 200, "X");

        let mut updated = CartStore::new();
        updated.add_item(&a, 2);
        updated.add_item(&b, 1);
        updated.update_quantity("a", 0);

        let mut removed = CartStore::new();
        removed.add_item(&a, 2);
        removed.add_item(&b, 1);
        removed.remove_item("a");

        assert_eq!(updated.lines(), removed.lines());
    }

    #[test]
    fn negative_quantity_empties_the_cart() {
        let a = sample_product("a", "A", 100, "X");
        let mut cart = CartStore::new();
        cart.add_item(&a, 1);
        cart.update_quantity("a", -5);
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn update_sets_quantity_and_ignores_unknown_ids() {
        let a = sample_product("a", "A", 100, "X");
        let mut cart = CartStore::new();
        cart.add_item(&a, 1);
        cart.update_quantity("a", 5);
        cart.update_quantity("missing", 3);
        cart.remove_item("missing");
        assert_eq!(cart.total_item_count(), 5);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn clear_zeroes_count_and_price() {
        let a = sample_product("a", "A", 100, "X");
        let mut cart = CartStore::new();
        cart.add_item(&a, 4);
        cart.clear();
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), Money::ZERO);
    }

    #[test]
    fn listeners_see_changes_but_not_no_ops() {
        let a = sample_product("a", "A", 100, "X");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut cart = CartStore::new();
        let sink = seen.clone();
        let id = cart.subscribe(move |store| sink.borrow_mut().push(store.total_item_count()));

        cart.add_item(&a, 2);
        cart.update_quantity("a", 2);
        cart.remove_item("nope");
        cart.update_quantity("a", 3);
        cart.clear();
        cart.clear();

        assert_eq!(*seen.borrow(), vec![2, 3, 0]);
        assert_eq!(cart.revision(), 3);

        cart.unsubscribe(id);
        cart.add_item(&a, 1);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn restoring_merges_duplicates_and_drops_empty_lines() {
        let a = sample_product("a", "A", 100, "X");
        let line = CartLine::from_product(&a, 2);
        let mut empty = line.clone();
        empty.product_id = "z".into();
        empty.quantity = 0;

        let cart = CartStore::from_lines(vec![line.clone(), empty, line]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_item_count(), 4);
    }

    #[test]
    fn huge_quantities_saturate_instead_of_overflowing() {
        let a = sample_product("a", "A", 100, "X");
        let b = sample_product("b", "B", 100, "X");
        let line = CartLine::from_product(&a, u32::MAX);

        let mut cart = CartStore::from_lines(vec![line.clone(), line]);
        assert_eq!(cart.total_item_count(), u32::MAX);

        cart.add_item(&a, 5);
        assert_eq!(cart.line("a").map(|l| l.quantity), Some(u32::MAX));

        cart.add_item(&b, 2);
        assert_eq!(cart.total_item_count(), u32::MAX);
        assert!(cart.total_price() > Money::ZERO);
    }

    #[test]
    fn lines_survive_a_json_round_trip() {
        let a = sample_product("a", "A", 129_999, "X");
        let mut cart = CartStore::new();
        cart.add_item(&a, 2);
        let raw = serde_json::to_string(cart.lines()).unwrap();
        let restored = CartStore::from_lines(serde_json::from_str(&raw).unwrap());
        assert_eq!(restored.total_price(), Money::from_cents(259_998));
    }
}
