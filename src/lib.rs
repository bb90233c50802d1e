//! Storefront Catalog - filter, sort and paginate product and order listings
//!
//! A pure, synchronous pipeline shared by the shop product listing, the
//! wishlist and the admin order dashboard: build a predicate from the
//! selected filters, order the survivors, and cut out one page.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filtering;

pub use catalog::{Catalog, CatalogItem, Status};
pub use error::{CatalogError, Result};
pub use filtering::{run_pipeline, CatalogPipeline, FilterCriteria, Page, SortSpec};
