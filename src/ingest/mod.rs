//! Record ingestion: fetches or loads the per-year JSON datasets and
//! produces one flat, normalized record collection.

mod dataset;
mod dataset_fetcher;
mod file_finder;

pub use dataset::{parse_dataset, year_from_filename, CancelFlag};
pub use dataset_fetcher::fetch_datasets;
pub use file_finder::{find_dataset_files, load_dir};
