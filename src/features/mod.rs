pub mod auth;
pub mod banners;
pub mod categories;
pub mod images;
pub mod products;
