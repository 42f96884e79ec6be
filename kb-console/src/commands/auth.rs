use super::Console;
use crate::render;

pub async fn login(console: &Console, username: &str, password: &str) -> anyhow::Result<()> {
    let session = console.client.login(username, password).await?;
    let granted = console.client.access().grants().len();
    println!(
        "Login Successful! Signed in as {} ({granted} permissions)",
        session.user.username
    );
    Ok(())
}

pub async fn logout(console: &Console) -> anyhow::Result<()> {
    console.client.logout().await?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(console: &Console) -> anyhow::Result<()> {
    let session = console.client.require_session()?;
    if console.json {
        return render::json(&serde_json::to_value(&session.user)?);
    }
    let user = &session.user;
    render::fields(&[
        ("id", user.id.to_string()),
        ("username", user.username.clone()),
        ("role", user.role_id.map(|r| r.to_string()).unwrap_or_else(|| "-".into())),
        ("active", user.is_verified.to_string()),
        ("token type", session.token_type.clone()),
    ]);
    let grants = console.client.access().grants();
    let names: Vec<_> = grants.iter().map(|g| g.name.as_str()).collect();
    render::fields(&[("permissions", names.join(", "))]);
    Ok(())
}

pub async fn refresh(console: &Console) -> anyhow::Result<()> {
    let session = console.client.refresh().await?;
    println!("Token refreshed for {}", session.user.username);
    Ok(())
}

pub async fn change_password(
    console: &Console,
    username: &str,
    old: &str,
    new: &str,
    confirm: &str,
) -> anyhow::Result<()> {
    console
        .client
        .auth()
        .change_password(username, old, new, confirm)
        .await?;
    println!("Password Changed! You can now log in with your new password");
    Ok(())
}
