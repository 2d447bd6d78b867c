// Signed-in account commands

use anyhow::{bail, Context, Result};

use renthub_client::SessionHandle;
use renthub_core::{PasswordChange, ProfileUpdate, UserProfile};

use crate::output::{print_field, OutputFormat};

fn print_identity(user: &UserProfile) {
    print_field("Id", &user.id.to_string());
    print_field("Email", &user.email);
    print_field("Name", &user.full_name);
    print_field("Role", &user.role.to_string());
    if let Some(phone) = &user.phone_number {
        print_field("Phone", phone);
    }
}

pub async fn whoami(session: &SessionHandle, output: OutputFormat) -> Result<()> {
    let state = session.current();
    let Some(user) = state.user else {
        bail!("not signed in");
    };

    if output.is_text() {
        print_identity(&user);
    } else {
        output.print_value(&user);
    }
    Ok(())
}

pub async fn update(
    session: &SessionHandle,
    output: OutputFormat,
    quiet: bool,
    full_name: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let update = ProfileUpdate {
        full_name,
        phone_number: phone,
    };
    if update.is_empty() {
        bail!("nothing to update; pass --full-name or --phone");
    }

    let user = session
        .update_profile(&update)
        .await
        .context("profile update failed")?;

    if output.is_text() {
        if !quiet {
            println!("Profile updated.");
        }
        print_identity(&user);
    } else {
        output.print_value(&user);
    }
    Ok(())
}

pub async fn change_password(
    session: &SessionHandle,
    quiet: bool,
    old_password: String,
    new_password: String,
) -> Result<()> {
    session
        .change_password(&PasswordChange {
            old_password,
            new_password,
        })
        .await
        .context("password change failed")?;

    if !quiet {
        println!("Password changed.");
    }
    Ok(())
}
