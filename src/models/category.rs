/// Subcategory marker stored when the user typed their own label.
/// The label itself lives in the item's `name`.
pub const CUSTOM_SUB_CATEGORY: &str = "Custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetCategory {
    LiquidAssets,
    FixedAssets,
    Investments,
    Receivables,
    Liabilities,
}

impl AssetCategory {
    pub const COUNT: usize = 5;

    /// Catalog order. The add flow walks categories in this sequence and
    /// every per-category report is laid out the same way.
    pub fn all() -> &'static [AssetCategory] {
        &[
            Self::LiquidAssets,
            Self::FixedAssets,
            Self::Investments,
            Self::Receivables,
            Self::Liabilities,
        ]
    }

    pub fn index(self) -> usize {
        match self {
            Self::LiquidAssets => 0,
            Self::FixedAssets => 1,
            Self::Investments => 2,
            Self::Receivables => 3,
            Self::Liabilities => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LiquidAssets => "Liquid Funds",
            Self::FixedAssets => "Fixed Assets",
            Self::Investments => "Investments",
            Self::Receivables => "Receivables",
            Self::Liabilities => "Liabilities",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::LiquidAssets => "Money available on demand, convertible to cash immediately",
            Self::FixedAssets => "Low-liquidity physical assets held for use or investment",
            Self::Investments => "Financial assets held for appreciation",
            Self::Receivables => "Money other people owe you",
            Self::Liabilities => "Money you owe to others",
        }
    }

    /// Preset subcategory names offered by the add flow, in display order.
    pub fn sub_categories(self) -> &'static [&'static str] {
        match self {
            Self::LiquidAssets => &[
                "Bank Current Account",
                "Alipay",
                "WeChat Pay",
                "Money Market Fund",
            ],
            Self::FixedAssets => &[
                "Property (Own Use)",
                "Property (Investment)",
                "Car",
                "Parking Space",
                "Gold & Jewellery",
                "Collectibles",
            ],
            Self::Investments => &[
                "Bank Wealth Product",
                "Term Deposit / CD",
                "Funds",
                "Stocks",
                "Gold",
                "P2P Lending",
            ],
            Self::Receivables => &["Loans to Others", "Deposits", "Reimbursements"],
            Self::Liabilities => &[
                "Credit Card",
                "Personal Loan",
                "Mortgage",
                "Car Loan",
                "Consumer Credit",
            ],
        }
    }

    /// Stable key written to the database. Never change these.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::LiquidAssets => "liquid_assets",
            Self::FixedAssets => "fixed_assets",
            Self::Investments => "investments",
            Self::Receivables => "receivables",
            Self::Liabilities => "liabilities",
        }
    }

    /// Accepts storage keys, labels and a few short aliases, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "liquid_assets" | "liquid_funds" | "liquid" | "cash" => Some(Self::LiquidAssets),
            "fixed_assets" | "fixed" => Some(Self::FixedAssets),
            "investments" | "investment" | "invest" => Some(Self::Investments),
            "receivables" | "receivable" => Some(Self::Receivables),
            "liabilities" | "liability" | "debt" => Some(Self::Liabilities),
            _ => None,
        }
    }

    pub fn is_liability(self) -> bool {
        matches!(self, Self::Liabilities)
    }

    /// Look up a preset by name within this category (case-insensitive).
    pub fn find_preset(self, name: &str) -> Option<&'static str> {
        let lower = name.trim().to_lowercase();
        self.sub_categories()
            .iter()
            .copied()
            .find(|p| p.to_lowercase() == lower)
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
