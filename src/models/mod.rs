pub mod failure_log;
pub mod loaders;
pub mod site_profile;
pub mod work_item;

pub use failure_log::{FailedItem, FailureLog};
pub use loaders::{load_work_items, parse_work_items};
pub use site_profile::{SiteKind, SiteProfile};
pub use work_item::WorkItem;
