//! Auth commands - login, logout, whoami

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::get_context;
use crate::output;

pub async fn login(username: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let username = match username {
        Some(u) => u,
        None => Input::<String>::new().with_prompt("Username").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    println!("{}", "Signing in...".dimmed());
    match ctx.auth.login(&username, &password).await? {
        Some(user) => {
            output::success(&format!("Logged in as {}", user.username));
            Ok(())
        }
        None => anyhow::bail!("Invalid username or password"),
    }
}

pub fn logout() -> Result<()> {
    let ctx = get_context()?;
    ctx.auth.logout()?;
    output::info("Logged out");
    Ok(())
}

pub fn whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = ctx.auth.restore();

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    match user {
        Some(user) => println!("{} (id {})", user.username.bold(), user.id),
        None => output::warning("Not logged in. Run 'sf login' to sign in."),
    }
    Ok(())
}
