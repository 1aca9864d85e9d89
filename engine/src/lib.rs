//! # Tally Engine
//!
//! Inventory counters kept in a remote document store.
//!
//! Each inventory item is one document keyed by its name and holding a
//! positive `quantity`. The engine turns user intents (add one, remove one,
//! set a quantity) into reads and writes against the store, and hands back a
//! freshly fetched [`Snapshot`] of the whole collection after every change.
//!
//! ## Core Concepts
//!
//! ### Store adapter
//!
//! [`StoreAdapter`] is the only way the engine reaches the store: read one,
//! list all, write one (optionally merging), delete one. Implementations:
//! - [`MemoryStore`] - in process, for tests and local use
//! - `HttpStore` - a remote `tally-server` (feature `http`)
//!
//! ### Counter engine
//!
//! [`Inventory`] implements the counter protocol:
//! - [`Inventory::increment`] - create at 1 or add one
//! - [`Inventory::decrement_or_delete`] - remove one, deleting instead of reaching 0
//!   ([`Inventory::remove_one`] also reports whether the item existed)
//! - [`Inventory::set_absolute`] - merge-write a validated positive quantity
//! - [`Inventory::list_all`] - fetch the snapshot
//!
//! Increments and decrements are read-then-write with no isolation; see the
//! [`inventory`] module docs for the lost-update hazard this implies.
//!
//! ### Filtered view
//!
//! [`project`] derives the subset of a snapshot matching a search term,
//! case-insensitively. It does no I/O.
//!
//! ## Quick Start
//!
//! ```rust
//! use tally_engine::{project, Inventory, Item, MemoryStore};
//!
//! # tokio_test_block(async {
//! let inventory = Inventory::new(MemoryStore::new());
//!
//! inventory.increment("apple").await.unwrap();
//! inventory.increment("banana").await.unwrap();
//! let snapshot = inventory.increment("apple").await.unwrap();
//! assert_eq!(snapshot.quantity_of("apple"), Some(2));
//!
//! let view = project(&snapshot, "AN");
//! assert_eq!(view.items(), &[Item::new("banana", 1)]);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread()
//! #         .enable_all()
//! #         .build()
//! #         .unwrap()
//! #         .block_on(f)
//! # }
//! ```

pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod inventory;
pub mod memory;
pub mod notice;
pub mod record;
pub mod snapshot;
pub mod store;
pub mod view;

// Re-export main types at crate root
pub use error::Error;
#[cfg(feature = "http")]
pub use http::HttpStore;
pub use inventory::{Inventory, InventoryConfig, Removal};
pub use memory::MemoryStore;
pub use notice::{Action, Notice, Outcome};
pub use record::{parse_quantity, validate_name, Document, Item, Record};
pub use snapshot::Snapshot;
pub use store::StoreAdapter;
pub use view::{project, FilteredView};

/// Type aliases for clarity
pub type ItemName = String;
pub type Quantity = i64;
