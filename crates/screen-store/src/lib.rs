//! Result store: per (category, source file) failure datasets.

pub mod dataset;
pub mod error;
pub mod store;

pub use dataset::{
    category_dir, dataset_path, list_datasets, load_dataset, read_dataset_frame,
    records_to_frame, remove_dataset, write_dataset,
};
pub use error::{Result, StoreError};
pub use store::ResultStore;
