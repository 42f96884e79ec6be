//! Categories and subcategories

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{
    Category, CategoryUpsert, Subcategory, SubcategoryCreate, SubcategoryUpdate, Visibility,
};

use super::required;
use crate::icon::IconDescriptor;
use crate::list::ListSource;
use crate::{ClientResult, HttpClient};

/// Category editor state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub description: Option<String>,
    /// `None` until an icon is picked
    pub icon: Option<IconDescriptor>,
    pub status: Visibility,
}

impl CategoryForm {
    /// Editor prefilled from an existing category
    ///
    /// A color outside the palette is reset to black.
    pub fn edit(category: &Category) -> Self {
        let icon = category
            .icon
            .as_deref()
            .and_then(IconDescriptor::decode)
            .map(|icon| IconDescriptor::new(icon.name, icon.color.palette_or_default()));
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            icon,
            status: category.status,
        }
    }

    pub fn into_upsert(self) -> ClientResult<CategoryUpsert> {
        let name = required(&self.name, "Category name is required")?;
        let icon = self.icon.unwrap_or_else(IconDescriptor::unset);
        Ok(CategoryUpsert {
            name,
            icon: icon.encode(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            status: self.status,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CategoriesApi<H> {
    http: H,
}

impl<H: HttpClient> CategoriesApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Category>> {
        self.http.get("/categories/").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Category> {
        self.http.get(&format!("/categories/{id}")).await
    }

    pub async fn create(&self, form: CategoryForm) -> ClientResult<Category> {
        let req = form.into_upsert()?;
        tracing::info!(name = %req.name, icon = %req.icon, "Creating category");
        self.http.post("/categories/", &req).await
    }

    pub async fn update(&self, id: i64, form: CategoryForm) -> ClientResult<Category> {
        let req = form.into_upsert()?;
        self.http.put(&format!("/categories/{id}"), &req).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Value> {
        tracing::info!(category_id = id, "Deleting category");
        self.http.delete(&format!("/categories/{id}")).await
    }

    /// New subcategory carrying the parent's visibility
    pub async fn create_subcategory(
        &self,
        parent: &Category,
        name: &str,
        description: Option<String>,
    ) -> ClientResult<Subcategory> {
        let req = SubcategoryCreate {
            category_id: parent.id,
            name: required(name, "Subcategory name is required")?,
            description,
            status: parent.status,
        };
        self.http.post("/categories/subcategories/", &req).await
    }

    pub async fn update_subcategory(
        &self,
        parent: &Category,
        id: i64,
        name: &str,
        description: Option<String>,
    ) -> ClientResult<Subcategory> {
        let req = SubcategoryUpdate {
            name: required(name, "Subcategory name is required")?,
            description,
            status: parent.status,
        };
        self.http
            .put(&format!("/categories/subcategories/{id}"), &req)
            .await
    }

    pub async fn delete_subcategory(&self, id: i64) -> ClientResult<Value> {
        self.http
            .delete(&format!("/categories/subcategories/{id}"))
            .await
    }
}

#[async_trait]
impl<H: HttpClient> ListSource for CategoriesApi<H> {
    type Item = Category;

    async fn fetch(&self) -> ClientResult<Vec<Category>> {
        self.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{BLACK, HexColor};

    fn category(icon: Option<&str>) -> Category {
        Category {
            id: 1,
            name: "Math".into(),
            description: Some("Numbers".into()),
            icon: icon.map(str::to_string),
            status: Visibility::Private,
            subcategories: Vec::new(),
        }
    }

    #[test]
    fn test_unpicked_icon_encodes_fallback() {
        let req = CategoryForm {
            name: " Math ".into(),
            ..Default::default()
        }
        .into_upsert()
        .unwrap();
        assert_eq!(req.name, "Math");
        assert_eq!(req.icon, "FaQuestionCircle_cccccc");
        assert_eq!(req.status, Visibility::Public);
    }

    #[test]
    fn test_edit_resets_off_palette_color() {
        let form = CategoryForm::edit(&category(Some("FaBook_123456")));
        assert_eq!(form.icon, Some(IconDescriptor::new("FaBook", BLACK)));
        assert_eq!(form.status, Visibility::Private);

        let form = CategoryForm::edit(&category(Some("FaBook_2196f3")));
        assert_eq!(form.icon.unwrap().color, HexColor([0x21, 0x96, 0xf3]));

        assert_eq!(CategoryForm::edit(&category(None)).icon, None);
    }

    #[test]
    fn test_blank_name_refused() {
        let err = CategoryForm::default().into_upsert().unwrap_err();
        assert_eq!(err.to_string(), "Category name is required");
    }
}
