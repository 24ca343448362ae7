//! Login, signup, logout and whoami

use serde_json::json;
use tracing::info;

use crate::cli::{password_or_prompt, print_json, Context};
use crate::errors::Result;
use crate::schemas::SignupRequest;
use crate::session::Session;

/// Log in and persist the session
pub async fn login(ctx: &Context, email: &str, password: Option<&str>) -> Result<()> {
    let password = password_or_prompt(password, false)?;
    let response = ctx.public_api()?.login(email.trim(), &password).await?;
    let session = Session::from(&response);
    ctx.store.save(&session)?;

    if ctx.json {
        return print_json(&session.user);
    }
    println!("Logged in as {}", session.user.display_name());
    Ok(())
}

/// Create an account, then keep the returned session
pub async fn signup(
    ctx: &Context,
    email: &str,
    first_name: &str,
    last_name: &str,
    company: &str,
    password: Option<&str>,
) -> Result<()> {
    let request = SignupRequest {
        email: email.trim().to_string(),
        password: password_or_prompt(password, true)?,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        company_name: company.to_string(),
    };
    let response = ctx.public_api()?.signup(&request).await?;
    let session = Session::from(&response);
    ctx.store.save(&session)?;

    if ctx.json {
        return print_json(&session.user);
    }
    println!("{}", response.message);
    Ok(())
}

/// Forget the session. Token and user go together.
pub async fn logout(ctx: &Context) -> Result<()> {
    let removed = ctx.store.clear()?;
    info!(removed, "Logged out");

    if ctx.json {
        return print_json(&json!({ "logged_out": removed }));
    }
    if removed {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.store.require()?;
    if ctx.json {
        return print_json(&session.user);
    }
    match &session.user.tenant {
        Some(tenant) => println!("{} <{}> @ {}", session.user.display_name(), session.user.email, tenant),
        None => println!("{} <{}>", session.user.display_name(), session.user.email),
    }
    Ok(())
}
