pub mod api;
pub mod assets;
pub mod card;
pub mod colors;
pub mod config;
pub mod debounce;
pub mod feed;
pub mod http_cache;
pub mod http_client;
pub mod model;
pub mod reference;
pub mod sbc;
pub mod state;
pub mod tier;
