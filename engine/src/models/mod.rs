// Engine-side value types. Table and result models live in `shared::models`.
pub mod discount_rate;

pub use discount_rate::DiscountRate;
