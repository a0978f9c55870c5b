use serde::de::DeserializeOwned;
use serde::Serialize;

pub const SESSION_KEY: &str = "session_user";
pub const CART_KEY: &str = "cart";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Missing or malformed entries read as `None`.
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    if let Some(storage) = local_storage() {
        if let Ok(Some(raw)) = storage.get_item(key) {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => return Some(value),
                Err(err) => tracing::warn!(key, %err, "discarding malformed stored value"),
            }
        }
    }
    None
}

pub fn save<T: Serialize + ?Sized>(key: &str, value: &T) {
    if let Some(storage) = local_storage() {
        if let Ok(raw) = serde_json::to_string(value) {
            if storage.set_item(key, &raw).is_err() {
                tracing::warn!(key, "could not write to localStorage");
            }
        }
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}
