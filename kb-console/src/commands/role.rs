//! Role settings section and the permission matrix

use kb_client::access::{CheckedState, Menu, PermissionMatrix, capability};
use shared::models::Role;

use super::Console;
use crate::cli::RoleCommand;
use crate::render;

pub async fn run(console: &Console, cmd: RoleCommand) -> anyhow::Result<()> {
    console.mount_settings(capability::ROLE_SETTING, |s| s.roles)?;
    let api = console.client.roles();
    let mut list = console.client.role_list();

    match cmd {
        RoleCommand::List => {
            list.load().await?;
            print_list(console, list.items())
        }
        RoleCommand::Create { name, description } => {
            let role = list.mutate(api.create(&name, &description)).await?;
            println!("Role \"{}\" created", role.name);
            print_list(console, list.items())
        }
        RoleCommand::Update {
            role,
            name,
            description,
        } => {
            let current = api.find_by_name(&role).await?;
            list.mutate(api.update(current.id, &name, &description))
                .await?;
            println!("Role updated");
            print_list(console, list.items())
        }
        RoleCommand::Delete { role } => {
            let current = api.find_by_name(&role).await?;
            list.mutate(api.delete(current.id)).await?;
            println!("Role \"{}\" deleted", current.name);
            print_list(console, list.items())
        }
        RoleCommand::Permissions { role } => {
            let role = api.find_by_name(&role).await?;
            let matrix = PermissionMatrix::from_permissions(&api.permissions().await?);
            let grants = api.role_permissions(role.id).await?;
            let checked = PermissionMatrix::checked_from_grants(&grants);
            print_matrix(console, &role, &matrix, &checked)
        }
        RoleCommand::Grant { role, permissions } => {
            let role = api.find_by_name(&role).await?;
            let matrix = PermissionMatrix::from_permissions(&api.permissions().await?);
            let checked = PermissionMatrix::checked_from_names(permissions.iter().map(String::as_str));
            let ids = matrix.permission_ids(&checked);
            if ids.len() < permissions.len() {
                tracing::warn!(
                    requested = permissions.len(),
                    known = ids.len(),
                    "Some permission names are unknown and were skipped"
                );
            }
            let grants = api.replace_role_permissions(role.id, ids).await?;
            println!("Permissions saved ({} granted)", grants.len());
            let checked = PermissionMatrix::checked_from_grants(&grants);
            print_matrix(console, &role, &matrix, &checked)
        }
    }
}

fn print_list(console: &Console, roles: &[Role]) -> anyhow::Result<()> {
    if console.json {
        return render::json(&serde_json::to_value(roles)?);
    }
    let rows: Vec<Vec<String>> = roles
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name.clone(),
                render::or_dash(r.description.as_deref()),
            ]
        })
        .collect();
    render::table(&["ID", "Role", "Description"], &rows);
    Ok(())
}

fn print_matrix(
    console: &Console,
    role: &Role,
    matrix: &PermissionMatrix,
    checked: &CheckedState,
) -> anyhow::Result<()> {
    if console.json {
        let ticked: Vec<i64> = matrix.permission_ids(checked);
        return render::json(&serde_json::json!({
            "role": role.name,
            "permission_ids": ticked,
        }));
    }
    println!("Permissions of \"{}\"", role.name);
    let mut rows = Vec::new();
    for menu in Menu::ALL {
        for entry in matrix.entries(menu) {
            let ticked = checked.get(&menu).is_some_and(|keys| keys.contains(&entry.key));
            rows.push(vec![
                menu.to_string(),
                entry.label.clone(),
                if ticked { "[x]" } else { "[ ]" }.to_string(),
            ]);
        }
    }
    render::table(&["Menu", "Permission", "Granted"], &rows);
    Ok(())
}
