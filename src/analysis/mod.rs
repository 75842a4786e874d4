// Seasonality computation stages
mod chart_scale;
mod composer;
mod seasonality;

pub use chart_scale::{DisplayScale, emit_chart_rows, scale_for_display};
pub use composer::compose;
pub use seasonality::{compute_deltas, compute_seasonality, detrend};
