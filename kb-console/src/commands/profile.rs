use kb_client::access::capability;
use shared::models::{ProfileFields, UserProfile};

use super::Console;
use crate::cli::ProfileCommand;
use crate::render;

pub async fn run(console: &Console, cmd: ProfileCommand) -> anyhow::Result<()> {
    let api = console.client.profile();
    match cmd {
        ProfileCommand::Show => {
            console.mount(capability::VIEW_PROFILE)?;
            print(console, &api.me().await?)
        }
        ProfileCommand::Update {
            title,
            first_name,
            last_name,
            phone,
            date_of_birth,
            gender,
            country,
            city,
            address,
        } => {
            console.mount(capability::EDIT_PROFILE)?;
            // Start from the stored profile so omitted flags keep their value
            let mut fields = api.me().await?.fields;
            let edits = ProfileFields {
                title,
                first_name,
                last_name,
                phone,
                date_of_birth,
                gender,
                country,
                city,
                address,
            };
            merge(&mut fields, edits);
            let updated = api.update_me(fields).await?;
            println!("Profile updated");
            print(console, &updated)
        }
    }
}

fn merge(fields: &mut ProfileFields, edits: ProfileFields) {
    macro_rules! take {
        ($($name:ident),*) => {
            $(if edits.$name.is_some() { fields.$name = edits.$name; })*
        };
    }
    take!(title, first_name, last_name, phone, date_of_birth, gender, country, city, address);
}

fn print(console: &Console, profile: &UserProfile) -> anyhow::Result<()> {
    if console.json {
        return render::json(&serde_json::to_value(profile)?);
    }
    let f = &profile.fields;
    render::fields(&[
        ("name", render::or_dash(Some(&profile.display_name))),
        ("title", render::or_dash(f.title.as_deref())),
        ("first name", render::or_dash(f.first_name.as_deref())),
        ("last name", render::or_dash(f.last_name.as_deref())),
        ("phone", render::or_dash(f.phone.as_deref())),
        (
            "date of birth",
            f.date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
        ),
        (
            "gender",
            f.gender
                .map(|g| format!("{g:?}").to_lowercase())
                .unwrap_or_else(|| "-".into()),
        ),
        ("country", render::or_dash(f.country.as_deref())),
        ("city", render::or_dash(f.city.as_deref())),
        ("address", render::or_dash(f.address.as_deref())),
    ]);
    Ok(())
}
