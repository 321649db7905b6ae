//! Contract module containing trait definitions for analytics operations

mod dataset_view;
mod view_store;

pub use dataset_view::DatasetView;
pub use view_store::ViewStore;
