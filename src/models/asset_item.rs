use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::AssetCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct AssetItem {
    pub id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub category: AssetCategory,
    pub sub_category: String,
    pub creation_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl AssetItem {
    pub fn new(name: String, amount: Decimal, category: AssetCategory, sub_category: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            amount,
            category,
            sub_category,
            creation_date: now,
            update_date: now,
        }
    }

    /// Rewrite the editable fields and refresh `update_date`.
    pub fn apply_edit(&mut self, name: String, sub_category: String, amount: Decimal) {
        self.name = name;
        self.sub_category = sub_category;
        self.amount = amount;
        self.touch();
    }

    /// `update_date` only ever moves forward, even if the clock hasn't ticked
    /// since the last write.
    pub fn touch(&mut self) {
        let floor = self.update_date + Duration::microseconds(1);
        self.update_date = Utc::now().max(floor);
    }

    pub fn is_liability(&self) -> bool {
        self.category.is_liability()
    }

    pub fn is_custom(&self) -> bool {
        self.sub_category == super::CUSTOM_SUB_CATEGORY
    }

    /// Short id prefix for lists and CLI output.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}
