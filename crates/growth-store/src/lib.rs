//! Persistent storage for child records.
//!
//! The percentile engine never touches storage. Front ends load a
//! [`ChildList`] through a [`ChildStore`], edit it, and save it back whole.
//!
//! # File Format
//!
//! ```json
//! {
//!   "children": [
//!     {
//!       "id": "c1",
//!       "name": "Sam",
//!       "dateOfBirth": "2024-01-01",
//!       "gender": "male",
//!       "measurements": [
//!         { "id": "m1", "date": "2024-03-01", "ageInDays": 60, "height": 58.0 }
//!       ]
//!     }
//!   ],
//!   "createdAt": "2024-03-01T09:00:00Z",
//!   "lastModified": "2024-03-01T09:00:00Z"
//! }
//! ```
//!
//! A bare JSON array of children is also accepted on load.

mod document;
mod error;
mod json;
mod store;

pub use document::ChildList;
pub use error::{Result, StoreError};
pub use json::{DEFAULT_STORE_FILE, JsonFileStore, STORE_ENV_VAR};
pub use store::{ChildStore, MemoryStore};
