// Tabular data: workbook and CSV loaders, and the per-session store.
pub mod csv_parser;
pub mod session_store;
pub mod workbook;

pub use session_store::SessionStore;
pub use workbook::{load_workbook, Workbook};
