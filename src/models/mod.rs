mod asset_item;
mod category;

pub use asset_item::AssetItem;
pub use category::{AssetCategory, CUSTOM_SUB_CATEGORY};
