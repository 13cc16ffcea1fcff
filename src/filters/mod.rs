pub mod brand;
pub mod mode;
pub mod price_cap;

pub use brand::{brand_options, normalize_brand, DEFAULT_BRANDS};
pub use mode::Mode;
pub use price_cap::{label_for, label_of, parse_max_price, value_of};
