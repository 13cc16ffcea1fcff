pub mod category;
pub mod number;
pub mod types;

pub use category::{Category, CategoryGroup};
pub use number::LenientNumber;
pub use types::Phone;
