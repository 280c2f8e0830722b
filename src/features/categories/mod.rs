//! Product categories for the storefront.
//!
//! Categories form a forest through `parent_id` references. The flat list
//! lives in the database; the nested tree is derived on demand and cached
//! until the next mutation.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | Flat list, or tree with `?tree=true` |
//! | GET | `/api/categories/{id}` | No | Single category |
//! | GET | `/api/categories/{id}/breadcrumbs` | No | Root-to-category path |
//! | POST | `/api/admin/categories` | Admin | Create category |
//! | PUT | `/api/admin/categories/{id}` | Admin | Update category |
//! | DELETE | `/api/admin/categories/{id}` | Admin | Delete category (childless only) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
