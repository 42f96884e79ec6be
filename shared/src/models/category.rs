//! Category Model

use serde::{Deserialize, Serialize};

/// Visibility of a category and its subcategories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(format!("unknown visibility: {other}")),
        }
    }
}

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Icon descriptor, `"<IconName>_<RRGGBB>"`
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub status: Visibility,

    /// Only populated by `GET /categories/{id}`
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// Create/update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpsert {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Visibility,
}

/// Subcategory entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Visibility,
}

/// Create subcategory payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoryCreate {
    pub category_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Inherited from the parent category
    pub status: Visibility,
}

/// Update subcategory payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoryUpdate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Visibility,
}
