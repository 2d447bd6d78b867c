// Sign-in and sign-out commands

use anyhow::{Context, Result};

use renthub_client::SessionHandle;
use renthub_core::{LoginCredentials, RegisterInfo, UserRole};

use crate::output::OutputFormat;

pub async fn login(
    session: &SessionHandle,
    output: OutputFormat,
    quiet: bool,
    email: String,
    password: String,
) -> Result<()> {
    let user = session
        .login(&LoginCredentials { email, password })
        .await
        .context("login failed")?;

    if output.is_text() {
        if !quiet {
            println!("Signed in as {} ({})", user.full_name, user.role);
        }
    } else {
        output.print_value(&user);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn register(
    session: &SessionHandle,
    output: OutputFormat,
    quiet: bool,
    full_name: String,
    email: String,
    password: String,
    role: String,
    phone: Option<String>,
) -> Result<()> {
    let role: UserRole = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let info = RegisterInfo {
        full_name,
        email,
        password,
        role,
        phone_number: phone,
        profile_picture: None,
    };

    let user = session.register(&info).await.context("registration failed")?;

    if output.is_text() {
        if !quiet {
            println!("Account created for {}. Sign in with `renthub login`.", user.email);
        }
    } else {
        output.print_value(&user);
    }
    Ok(())
}

pub async fn logout(session: &SessionHandle, quiet: bool) -> Result<()> {
    session.logout().await;
    if !quiet {
        println!("Signed out.");
    }
    Ok(())
}

pub async fn google_url(session: &SessionHandle) -> Result<()> {
    println!("{}", session.gateway().google_login_url());
    Ok(())
}

pub async fn google_callback(
    session: &SessionHandle,
    output: OutputFormat,
    quiet: bool,
    token: String,
) -> Result<()> {
    let user = session
        .complete_external_login(&token)
        .await
        .context("Google sign-in failed")?;

    if output.is_text() {
        if !quiet {
            println!("Signed in as {} ({})", user.full_name, user.role);
        }
    } else {
        output.print_value(&user);
    }
    Ok(())
}
