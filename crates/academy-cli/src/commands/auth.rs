use academy_application::AdminConsole;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn login(console: &AdminConsole, phone: &str) -> Result<()> {
    let auth = console.auth();
    auth.send_otp(phone).await?;
    println!("{}", format!("OTP sent to {phone}").green());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("Enter the 6-digit OTP (blank to cancel): ");
        std::io::stdout().flush()?;
        let line = lines
            .next_line()
            .await
            .context("Failed to read OTP")?
            .unwrap_or_default();
        let otp = line.trim();
        if otp.is_empty() {
            auth.change_number();
            println!("{}", "Login cancelled".bright_black());
            return Ok(());
        }

        match auth.verify_otp(otp).await {
            Ok(user) => {
                println!(
                    "{}",
                    format!("Signed in as {} ({})", user.display_name(), user.role).green()
                );
                return Ok(());
            }
            // A wrong code may be retried with the same reference id.
            Err(err) if err.is_validation() => {
                eprintln!("{}", err.to_string().red());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

pub async fn logout(console: &AdminConsole) -> Result<()> {
    console.auth().logout().await?;
    println!("{}", "Signed out".green());
    Ok(())
}

pub async fn whoami(console: &AdminConsole, check: bool) -> Result<()> {
    let auth = console.auth();
    let Some(user) = auth.current_user() else {
        println!("{}", "Not signed in".yellow());
        return Ok(());
    };

    println!("{} {}", "Name:".bold(), user.display_name());
    println!("{} {}", "Phone:".bold(), user.contact_number);
    println!("{} {}", "Role:".bold(), user.role);
    if let Some(organization) = &user.organization_name {
        println!("{} {}", "Organization:".bold(), organization);
    }
    println!("{} {}", "Server:".bold(), console.base_url());

    if check {
        let status = if auth.validate_token().await {
            "valid".green()
        } else {
            "rejected".red()
        };
        println!("{} {}", "Session:".bold(), status);
    }
    Ok(())
}
