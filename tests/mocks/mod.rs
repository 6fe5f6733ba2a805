pub mod backend;
pub mod fetcher;
