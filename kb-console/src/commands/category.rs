use kb_client::access::capability;
use kb_client::api::CategoryForm;
use kb_client::{ClientError, HexColor, IconDescriptor};
use shared::models::Category;

use super::Console;
use crate::cli::{CategoryCommand, CategoryFields};
use crate::render;

pub async fn run(console: &Console, cmd: CategoryCommand) -> anyhow::Result<()> {
    let api = console.client.categories();
    match cmd {
        CategoryCommand::List => {
            console.mount(capability::VIEW_CATEGORY)?;
            let mut list = console.client.category_list();
            list.load().await?;
            print_list(console, list.items())
        }
        CategoryCommand::Show { id } => {
            console.mount(capability::VIEW_CATEGORY)?;
            let category = api.get(id).await?;
            print_one(console, &category)
        }
        CategoryCommand::Create(fields) => {
            console.mount(capability::ADD_CATEGORY)?;
            let mut list = console.client.category_list();
            let created = list.mutate(api.create(form(fields, None)?)).await?;
            println!("Category created successfully. (id {})", created.id);
            print_list(console, list.items())
        }
        CategoryCommand::Update { id, fields } => {
            console.mount(capability::EDIT_CATEGORY)?;
            let current = api.get(id).await?;
            let form = form(fields, Some(&current))?;
            let mut list = console.client.category_list();
            list.mutate(api.update(id, form)).await?;
            println!("Category updated successfully.");
            print_list(console, list.items())
        }
        CategoryCommand::Delete { id } => {
            console.mount(capability::DELETE_CATEGORY)?;
            let mut list = console.client.category_list();
            list.mutate(api.delete(id)).await?;
            println!("Category deleted.");
            print_list(console, list.items())
        }
        CategoryCommand::SubAdd {
            category_id,
            name,
            description,
        } => {
            console.mount(capability::EDIT_CATEGORY)?;
            let parent = api.get(category_id).await?;
            let sub = api.create_subcategory(&parent, &name, description).await?;
            println!("Subcategory added. (id {}, {})", sub.id, sub.status.as_str());
            print_one(console, &api.get(category_id).await?)
        }
        CategoryCommand::SubUpdate {
            category_id,
            id,
            name,
            description,
        } => {
            console.mount(capability::EDIT_CATEGORY)?;
            let parent = api.get(category_id).await?;
            api.update_subcategory(&parent, id, &name, description).await?;
            println!("Subcategory updated.");
            print_one(console, &api.get(category_id).await?)
        }
        CategoryCommand::SubDelete { category_id, id } => {
            console.mount(capability::EDIT_CATEGORY)?;
            api.delete_subcategory(id).await?;
            println!("Subcategory deleted.");
            print_one(console, &api.get(category_id).await?)
        }
    }
}

/// Editor state from flags, starting from `current` when editing
fn form(fields: CategoryFields, current: Option<&Category>) -> anyhow::Result<CategoryForm> {
    let color: HexColor = fields
        .color
        .parse()
        .map_err(ClientError::Precondition)?;
    let mut form = current.map(CategoryForm::edit).unwrap_or_default();
    form.name = fields.name;
    if let Some(status) = fields.status {
        form.status = status;
    }
    if fields.description.is_some() {
        form.description = fields.description;
    }
    if let Some(name) = fields.icon {
        let icon = IconDescriptor::new(name, color);
        if !icon.is_known() {
            tracing::warn!(icon = %icon.name, "Icon not in catalogue, it will render as the fallback");
        }
        form.icon = Some(icon);
    }
    Ok(form)
}

fn icon_cell(category: &Category) -> String {
    match category.icon.as_deref().and_then(IconDescriptor::decode) {
        Some(icon) => format!("{} {}", icon.glyph(), icon.color),
        None => "-".to_string(),
    }
}

fn print_list(console: &Console, categories: &[Category]) -> anyhow::Result<()> {
    if console.json {
        return render::json(&serde_json::to_value(categories)?);
    }
    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                icon_cell(c),
                c.status.as_str().to_string(),
                c.subcategories.len().to_string(),
            ]
        })
        .collect();
    render::table(&["ID", "Name", "Icon", "Status", "Subcategories"], &rows);
    Ok(())
}

fn print_one(console: &Console, category: &Category) -> anyhow::Result<()> {
    if console.json {
        return render::json(&serde_json::to_value(category)?);
    }
    render::fields(&[
        ("id", category.id.to_string()),
        ("name", category.name.clone()),
        ("description", render::or_dash(category.description.as_deref())),
        ("icon", icon_cell(category)),
        ("status", category.status.as_str().to_string()),
    ]);
    let rows: Vec<Vec<String>> = category
        .subcategories
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                render::or_dash(s.description.as_deref()),
                s.status.as_str().to_string(),
            ]
        })
        .collect();
    render::table(&["ID", "Subcategory", "Description", "Status"], &rows);
    Ok(())
}
