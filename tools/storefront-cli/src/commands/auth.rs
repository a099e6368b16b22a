//! Sign-in commands.

use anyhow::{bail, Result};
use dialoguer::{Input, Password};
use storefront_auth::{User, MSG_LOGIN_FAILED, MSG_REGISTRATION_FAILED};

use super::{AuthArgs, AuthCommand};
use crate::context::Context;

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &mut Context) -> Result<()> {
    match args.command {
        AuthCommand::Login { email } => login(email, ctx).await,
        AuthCommand::Register { username, email } => register(username, email, ctx).await,
        AuthCommand::Logout => logout(ctx),
        AuthCommand::Whoami => whoami(ctx).await,
    }
}

async fn login(email: Option<String>, ctx: &mut Context) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let spinner = ctx.output.spinner("Signing in...");
    let result = ctx
        .auth
        .login(&ctx.api, &email, &password)
        .await
        .map(User::clone);
    spinner.finish_and_clear();

    match result {
        Ok(user) => {
            ctx.sync_token();
            report_signed_in("Signed in", &user, ctx);
            Ok(())
        }
        Err(_) => bail!("{}", ctx.auth.error().unwrap_or(MSG_LOGIN_FAILED)),
    }
}

async fn register(
    username: Option<String>,
    email: Option<String>,
    ctx: &mut Context,
) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords don't match")
        .interact()?;

    let spinner = ctx.output.spinner("Creating account...");
    let result = ctx
        .auth
        .register(&ctx.api, &username, &email, &password)
        .await
        .map(User::clone);
    spinner.finish_and_clear();

    match result {
        Ok(user) => {
            ctx.sync_token();
            report_signed_in("Account created", &user, ctx);
            Ok(())
        }
        Err(_) => bail!("{}", ctx.auth.error().unwrap_or(MSG_REGISTRATION_FAILED)),
    }
}

fn logout(ctx: &mut Context) -> Result<()> {
    ctx.auth.logout();
    ctx.sync_token();
    ctx.output.success("Signed out");
    Ok(())
}

async fn whoami(ctx: &mut Context) -> Result<()> {
    ctx.restore_session().await;

    let Some(user) = ctx.auth.user() else {
        if let Some(error) = ctx.auth.error() {
            ctx.output.warn(error);
        }
        bail!("Not signed in");
    };

    if ctx.output.is_json() {
        ctx.output.json(user);
        return Ok(());
    }

    ctx.output.header(&user.display_name());
    ctx.output.kv("Username", &user.username);
    ctx.output.kv("Email", &user.email);
    ctx.output.kv("User ID", &user.id.to_string());
    Ok(())
}

fn report_signed_in(msg: &str, user: &User, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(user);
        return;
    }
    ctx.output
        .success(&format!("{} as {}", msg, user.display_name()));
}
