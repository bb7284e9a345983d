//! `localStorage` access for the persisted sign-in session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only `net::identity` stores anything here. Writes report whether they took
//! effect so a session that cannot be persisted (quota, private mode) is
//! visible to the caller. On the server nothing is stored.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read and decode `key`. Missing, unreadable, or malformed entries are `None`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Encode and write `value` under `key`. Returns `false` if nothing was stored.
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let (Some(storage), Ok(raw)) = (local_storage(), serde_json::to_string(value)) else {
            return false;
        };
        storage.set_item(key, &raw).is_ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
        false
    }
}

/// Remove `key`. Returns `false` if storage is unusable.
pub fn remove(key: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        local_storage().is_some_and(|storage| storage.remove_item(key).is_ok())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        true
    }
}
