// Domain row types
mod quote;

pub use quote::{ChartRow, CombinedRow, DeltaRow, QuoteRow, SeasonalityPoint};
