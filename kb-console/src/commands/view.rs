//! Read-only views: dashboard, settings overview, icon catalogue

use kb_client::access::{Menu, capability};
use kb_client::icon;

use super::Console;
use crate::render;

pub fn dashboard(console: &Console) -> anyhow::Result<()> {
    console.mount(capability::VIEW_DASHBOARD)?;
    let session = console.client.require_session()?;
    println!("Dashboard - welcome, {}", session.user.username);

    let access = console.client.access();
    let rows: Vec<Vec<String>> = Menu::ALL
        .iter()
        .map(|menu| {
            let names: Vec<_> = access
                .grants()
                .into_iter()
                .filter(|g| g.menu == Some(*menu))
                .map(|g| g.name)
                .collect();
            vec![menu.to_string(), names.join(", ")]
        })
        .collect();
    render::table(&["Menu", "Granted"], &rows);
    Ok(())
}

pub fn settings(console: &Console) -> anyhow::Result<()> {
    let sections = console.settings_sections()?;
    let ctx = console.client.context();
    render::fields(&[
        ("theme", ctx.theme().to_string()),
        ("language", ctx.language().to_string()),
        ("users", available(sections.users)),
        ("roles", available(sections.roles)),
    ]);
    Ok(())
}

fn available(shown: bool) -> String {
    if shown { "available" } else { "hidden" }.to_string()
}

pub fn icons(search: Option<&str>) -> anyhow::Result<()> {
    let names = match search {
        Some(query) => icon::search(query),
        None => icon::CATALOGUE.to_vec(),
    };
    for name in &names {
        println!("{name}");
    }
    println!("{} icons", names.len());
    Ok(())
}
