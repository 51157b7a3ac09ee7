//! Category catalog: resolves a drill's cat/sub ids to display names.
//!
//! Supplied by the definition-management side and read-only during a run.
//! Missing ids degrade to empty labels, never an error.

use serde::{Deserialize, Serialize};

use crate::workout::Drill;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    /// Target shooting percentage for this subcategory, if set.
    #[serde(default)]
    pub goal: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub goal: Option<u32>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// Display labels for a drill's category and subcategory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillLabels {
    pub category: String,
    pub subcategory: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn subcategory(&self, cat_id: &str, sub_id: &str) -> Option<&Subcategory> {
        self.category(cat_id)?
            .subcategories
            .iter()
            .find(|s| s.id == sub_id)
    }

    /// Labels for announcements and reports; unknown ids come back empty.
    pub fn labels(&self, drill: &Drill) -> DrillLabels {
        let cat = drill.cat_id.as_deref().and_then(|id| self.category(id));
        let sub = match (&cat, drill.sub_id.as_deref()) {
            (Some(c), Some(sid)) => c.subcategories.iter().find(|s| s.id == sid),
            _ => None,
        };
        DrillLabels {
            category: cat.map(|c| c.name.clone()).unwrap_or_default(),
            subcategory: sub.map(|s| s.name.clone()).unwrap_or_default(),
        }
    }
}
