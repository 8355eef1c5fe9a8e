// GUI components module
pub mod chart;
pub mod data_table;
pub mod results_table;
pub mod sidebar;

pub use chart::BarChart;
pub use data_table::DataTable;
pub use results_table::ResultsTable;
pub use sidebar::Sidebar;
