pub mod formatter;

pub use formatter::{
    format_json, format_phone_detail, format_price, format_rank, format_results_table,
    format_spec, format_tsv, format_value, format_warranty, should_use_colors, truncate_title,
};
