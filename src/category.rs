//! Coarse module categorization.
//!
//! Categories are a labeling pass consumed by the exporters; they take no part
//! in graph analysis.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The category a module belongs to.
///
/// Variant order is the order categories are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Application entry points and top-level flows
    #[serde(rename = "main_app")]
    MainApplication,
    /// Shared foundation most other modules build on
    #[serde(rename = "core_foundation")]
    CoreFoundation,
    /// Feature modules following the UI naming convention
    #[serde(rename = "ui_features")]
    UIFeature,
    /// Everything else
    #[serde(rename = "infrastructure")]
    Infrastructure,
}

impl Category {
    /// All categories in render order.
    pub const ALL: [Category; 4] = [
        Category::MainApplication,
        Category::CoreFoundation,
        Category::UIFeature,
        Category::Infrastructure,
    ];

    /// Machine-readable key, matching the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MainApplication => "main_app",
            Self::CoreFoundation => "core_foundation",
            Self::UIFeature => "ui_features",
            Self::Infrastructure => "infrastructure",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MainApplication => "Main Application",
            Self::CoreFoundation => "Core Foundation",
            Self::UIFeature => "UI Features",
            Self::Infrastructure => "Infrastructure",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Membership sets and prefix used to categorize modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRules {
    /// Modules that make up the main application
    pub main_application: BTreeSet<String>,
    /// Modules that form the shared foundation
    pub core_foundation: BTreeSet<String>,
    /// Name prefix marking UI feature modules
    pub ui_prefix: String,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            main_application: ["AirAsFramework", "UICreateWallet", "UIHome"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            core_foundation: [
                "WalletCore",
                "WalletContext",
                "UIComponents",
                "UICharts",
                "UIPasscode",
                "Ledger",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ui_prefix: "UI".to_string(),
        }
    }
}

impl CategoryRules {
    /// Assigns a category to a module identifier.
    ///
    /// Rules are checked in priority order: main application membership, core
    /// foundation membership, UI prefix, then the infrastructure fallback.
    ///
    /// # Example
    ///
    /// ```rust
    /// use modscope::category::{Category, CategoryRules};
    ///
    /// let rules = CategoryRules::default();
    /// assert_eq!(rules.categorize("UIHome"), Category::MainApplication);
    /// assert_eq!(rules.categorize("UIComponents"), Category::CoreFoundation);
    /// assert_eq!(rules.categorize("UISwap"), Category::UIFeature);
    /// assert_eq!(rules.categorize("Analytics"), Category::Infrastructure);
    /// ```
    pub fn categorize(&self, module: &str) -> Category {
        if self.main_application.contains(module) {
            Category::MainApplication
        } else if self.core_foundation.contains(module) {
            Category::CoreFoundation
        } else if self.has_ui_prefix(module) {
            Category::UIFeature
        } else {
            Category::Infrastructure
        }
    }

    /// Returns true if the module is listed as core foundation.
    pub fn is_core(&self, module: &str) -> bool {
        self.core_foundation.contains(module)
    }

    /// Returns true if the module name follows the UI naming convention.
    ///
    /// An empty prefix matches nothing.
    pub fn has_ui_prefix(&self, module: &str) -> bool {
        !self.ui_prefix.is_empty() && module.starts_with(&self.ui_prefix)
    }

    /// Groups modules by category.
    ///
    /// Every category is present in the result, possibly empty. Modules are
    /// sorted within each category.
    pub fn categorize_all<'a, I>(&self, modules: I) -> BTreeMap<Category, Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut groups: BTreeMap<Category, Vec<String>> =
            Category::ALL.iter().map(|&c| (c, Vec::new())).collect();

        for module in modules {
            groups
                .entry(self.categorize(module))
                .or_default()
                .push(module.to_string());
        }

        for members in groups.values_mut() {
            members.sort();
        }

        groups
    }
}
