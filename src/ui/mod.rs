pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    banner, denied, error, feature_line, granted, header, info, muted, section, success,
    summary_row, value_line, warn,
};
pub use progress::ImportProgress;
pub use table::{feature_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
