//! User settings section

use kb_client::access::capability;
use kb_client::api::NewUser;
use shared::models::{ProfileFields, User, UserUpdate};

use super::Console;
use crate::cli::UserCommand;
use crate::render;

pub async fn run(console: &Console, cmd: UserCommand) -> anyhow::Result<()> {
    console.mount_settings(capability::USER_SETTING, |s| s.users)?;
    let api = console.client.users();
    let mut list = console.client.user_list();

    match cmd {
        UserCommand::List { search } => {
            list.source_mut().search = search;
            list.load().await?;
            print_list(console, list.items())
        }
        UserCommand::Show { id } => {
            let user = api.get(id).await?;
            print_one(console, &user)
        }
        UserCommand::Create {
            username,
            email,
            password,
            role,
            first_name,
            last_name,
        } => {
            let roles = console.client.roles().list().await?;
            let form = NewUser {
                username,
                email,
                password,
                role,
                profile: ProfileFields {
                    first_name,
                    last_name,
                    ..Default::default()
                },
            };
            let created = list.mutate(api.create(form, &roles)).await?;
            println!("User \"{}\" created (id {})", created.username, created.id);
            print_list(console, list.items())
        }
        UserCommand::Update {
            id,
            username,
            email,
        } => {
            let current = api.get(id).await?;
            let changes = UserUpdate {
                username,
                email,
                ..Default::default()
            };
            list.mutate(api.update(&current, &changes)).await?;
            println!("User updated");
            print_list(console, list.items())
        }
        UserCommand::Delete { id } => {
            let current = api.get(id).await?;
            list.mutate(api.delete(&current)).await?;
            println!("User \"{}\" deleted", current.username);
            print_list(console, list.items())
        }
        UserCommand::Activate { id } => {
            list.mutate(api.set_verified(id, true)).await?;
            println!("User activated");
            print_list(console, list.items())
        }
        UserCommand::Deactivate { id } => {
            list.mutate(api.set_verified(id, false)).await?;
            println!("User deactivated");
            print_list(console, list.items())
        }
        UserCommand::SetRole { id, role } => {
            let role = console.client.roles().find_by_name(&role).await?;
            list.mutate(api.set_role(id, role.id)).await?;
            println!("Role set to \"{}\"", role.name);
            print_list(console, list.items())
        }
    }
}

fn status(user: &User) -> &'static str {
    if user.is_active() { "active" } else { "inactive" }
}

fn print_list(console: &Console, users: &[User]) -> anyhow::Result<()> {
    if console.json {
        return render::json(&serde_json::to_value(users)?);
    }
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                u.id.to_string(),
                u.username.clone(),
                u.email.clone(),
                u.role_label().to_string(),
                status(u).to_string(),
            ]
        })
        .collect();
    render::table(&["ID", "Username", "Email", "Role", "Status"], &rows);
    Ok(())
}

fn print_one(console: &Console, user: &User) -> anyhow::Result<()> {
    if console.json {
        return render::json(&serde_json::to_value(user)?);
    }
    let profile = user.profile.as_ref();
    render::fields(&[
        ("id", user.id.to_string()),
        ("username", user.username.clone()),
        ("email", user.email.clone()),
        ("role", user.role_label().to_string()),
        ("status", status(user).to_string()),
        ("name", render::or_dash(profile.map(|p| p.full_name.as_str()))),
        (
            "last login",
            user.last_login
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
        ),
    ]);
    Ok(())
}
