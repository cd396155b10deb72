//! ad-store: generic in-memory resource store with cursor pagination.
//!
//! [`ResourceStore`] holds resources of one collection keyed by generated
//! identifiers. All access to the backing map goes through a single
//! `parking_lot::RwLock`; listing sorts a snapshot taken under the lock so
//! writers are never blocked by the sort.

pub mod page;
pub mod store;


pub use page::{ListPage, PageRequest};
pub use store::ResourceStore;
