use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::cart::{CartLine, CartStore};
use crate::catalog::Product;
use crate::money::Money;
use crate::storage;

/// Shared access to the cart. Equality follows the store's revision, so
/// consumers re-render after every change.
#[derive(Clone)]
pub struct CartHandle {
    store: Rc<RefCell<CartStore>>,
    revision: u64,
}

impl PartialEq for CartHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && self.revision == other.revision
    }
}

impl CartHandle {
    pub fn add_item(&self, product: &Product, quantity: u32) {
        self.store.borrow_mut().add_item(product, quantity);
    }

    pub fn update_quantity(&self, product_id: &str, quantity: i64) {
        self.store.borrow_mut().update_quantity(product_id, quantity);
    }

    pub fn remove_item(&self, product_id: &str) {
        self.store.borrow_mut().remove_item(product_id);
    }

    pub fn clear(&self) {
        self.store.borrow_mut().clear();
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.store.borrow().lines().to_vec()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.store
            .borrow()
            .line(product_id)
            .map_or(0, |line| line.quantity)
    }

    pub fn total_item_count(&self) -> u32 {
        self.store.borrow().total_item_count()
    }

    pub fn total_price(&self) -> Money {
        self.store.borrow().total_price()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }
}

#[derive(Properties, PartialEq)]
pub struct CartProviderProps {
    pub children: Children,
}

#[function_component(CartProvider)]
pub fn cart_provider(props: &CartProviderProps) -> Html {
    let store = use_state(|| {
        let saved: Vec<CartLine> = storage::load(storage::CART_KEY).unwrap_or_default();
        Rc::new(RefCell::new(CartStore::from_lines(saved)))
    });
    let force_update = use_force_update();

    {
        let store = (*store).clone();
        use_effect_with_deps(
            move |_| {
                let id = store.borrow_mut().subscribe(move |cart| {
                    storage::save(storage::CART_KEY, cart.lines());
                    // Re-render after the caller's borrow of the store ends.
                    let force_update = force_update.clone();
                    spawn_local(async move { force_update.force_update() });
                });
                move || store.borrow_mut().unsubscribe(id)
            },
            (),
        );
    }

    let handle = CartHandle {
        store: (*store).clone(),
        revision: store.borrow().revision(),
    };

    html! {
        <ContextProvider<CartHandle> context={handle}>
            { for props.children.iter() }
        </ContextProvider<CartHandle>>
    }
}
