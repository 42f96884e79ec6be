use super::Console;
use crate::cli::PrefsCommand;
use crate::render;

/// Theme and language work without a session
pub fn run(console: &Console, cmd: PrefsCommand) -> anyhow::Result<()> {
    let ctx = console.client.context();
    match cmd {
        PrefsCommand::Show => {}
        PrefsCommand::Theme { theme } => ctx.set_theme(theme)?,
        PrefsCommand::Language { language } => ctx.set_language(language)?,
    }
    render::fields(&[
        ("theme", ctx.theme().to_string()),
        ("language", ctx.language().to_string()),
    ]);
    Ok(())
}
