// Input table loading
mod loader;

pub use loader::QuoteLoader;
