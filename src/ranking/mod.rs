pub mod rank;

pub use rank::{rank, RankedItem, Rankable};
