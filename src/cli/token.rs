//! Token setup command handlers

use std::io::{self, BufRead, Write};

use secrecy::SecretString;

use crate::core::token_store::{mask_token, TokenStore, GITHUB_TOKEN_ENV};
use crate::error::{GhfetchError, Result};
use crate::github::{ClientConfig, GitHubClient, ProfileHandler};

/// Where classic tokens are created
const TOKEN_SETTINGS_URL: &str = "https://github.com/settings/tokens";

/// Prefixes of classic and fine-grained personal access tokens
const TOKEN_PREFIXES: [&str; 2] = ["ghp_", "github_pat_"];

/// Handle `--config`: read, validate and save a token
///
/// Returns the saved token so a run can continue with it.
pub async fn handle_config(store: &TokenStore, api_url: &str) -> Result<SecretString> {
    configure(&mut io::stdin().lock(), store, api_url).await
}

/// Handle `--reset-token`: delete the stored token, then set up a new one
/// when someone is at the keyboard
pub async fn handle_reset_token(store: &TokenStore, api_url: &str, interactive: bool) -> Result<()> {
    if store.reset()? {
        println!("✓ Previous token deleted.");
    } else {
        println!("No stored token to delete.");
    }

    if std::env::var_os(GITHUB_TOKEN_ENV).is_some_and(|v| !v.is_empty()) {
        println!(
            "Note: {} is set in your environment and still takes priority.",
            GITHUB_TOKEN_ENV
        );
    }

    if interactive {
        println!();
        handle_config(store, api_url).await?;
    }

    Ok(())
}

/// Offer token setup before a run that has no token
///
/// Declining, or any setup failure short of being unable to write the token
/// file, continues without a token.
pub async fn offer_setup(store: &TokenStore, api_url: &str) -> Result<Option<SecretString>> {
    offer(&mut io::stdin().lock(), store, api_url).await
}

async fn offer<R: BufRead>(
    input: &mut R,
    store: &TokenStore,
    api_url: &str,
) -> Result<Option<SecretString>> {
    println!("No GitHub token found.");
    println!("A token is needed for pinned repositories and the contribution heatmap.");

    let wants_setup = match confirm(input, "Set up a GitHub token now? [Y/n] ", true) {
        Ok(answer) => answer,
        Err(GhfetchError::Cancelled) => false,
        Err(e) => return Err(e),
    };

    if !wants_setup {
        println!("Running with limited functionality (no pinned repos).");
        println!("You can set up a token later with: ghfetch --config");
        println!();
        return Ok(None);
    }

    println!();
    match configure(input, store, api_url).await {
        Ok(token) => {
            println!();
            Ok(Some(token))
        }
        Err(e @ GhfetchError::TokenStore { .. }) => Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "token setup did not complete");
            println!("Continuing without a token.");
            println!();
            Ok(None)
        }
    }
}

/// Interactive setup reading answers from `input`
///
/// A token that fails validation can be re-entered until the user gives up.
async fn configure<R: BufRead>(
    input: &mut R,
    store: &TokenStore,
    api_url: &str,
) -> Result<SecretString> {
    print_instructions();

    loop {
        match attempt(input, store, api_url).await {
            Ok(token) => return Ok(token),
            Err(e) if is_retryable(&e) => {
                println!("✗ {}", e);
                println!("Please check your token and try again.");
                if !confirm(input, "Try again? [Y/n] ", true)? {
                    return Err(e);
                }
                println!();
            }
            Err(e) => return Err(e),
        }
    }
}

fn print_instructions() {
    println!("GitHub Token Setup");
    println!("==================");
    println!();
    println!("A personal access token lets ghfetch:");
    println!("  • show pinned repositories");
    println!("  • draw the contribution heatmap");
    println!("  • avoid the low anonymous API rate limit");
    println!();
    println!("To create a token:");
    println!("  1. Go to: {}", TOKEN_SETTINGS_URL);
    println!("  2. Generate new token (classic), with a note like 'ghfetch'");
    println!("  3. Select the 'read:user' scope (required for pinned repos and heatmap)");
    println!("  4. Click 'Generate token' and copy it");
    println!();
}

/// Read one token, validate it and save it
async fn attempt<R: BufRead>(
    input: &mut R,
    store: &TokenStore,
    api_url: &str,
) -> Result<SecretString> {
    let token = prompt(input, "Paste your token here: ")?;
    if token.is_empty() {
        return Err(GhfetchError::InvalidInput("No token provided".to_string()));
    }

    if !looks_like_token(&token) {
        println!("Warning: token format looks unusual. Tokens usually start with ghp_ or github_pat_.");
        if !confirm(input, "Continue anyway? [y/N] ", false)? {
            return Err(GhfetchError::Cancelled);
        }
    }

    let token = SecretString::from(token);

    println!();
    println!("Validating token...");
    let client = GitHubClient::new(ClientConfig::new(api_url, Some(token.clone())))?;
    let info = ProfileHandler::new(&client).validate_token().await?;

    println!("✓ Token valid! Logged in as @{}", info.login);
    if info.scopes.is_empty() {
        println!("  Token scopes: None");
    } else {
        println!("  Token scopes: {}", info.scopes.join(", "));
    }
    if !info.can_read_user() {
        println!("Warning: token may not have the 'read:user' scope.");
        println!("  Pinned repositories and the heatmap may not work.");
    }

    store.save(&token)?;
    tracing::info!(path = %store.path().display(), token = %mask_token(&token), "token stored");

    println!();
    println!("✓ Token saved to {}", store.path().display());
    println!("Welcome, {}!", info.login);
    Ok(token)
}

/// Failures the user can fix by entering another token
fn is_retryable(err: &GhfetchError) -> bool {
    matches!(
        err,
        GhfetchError::InvalidInput(_)
            | GhfetchError::AuthenticationFailed(_)
            | GhfetchError::Unauthorized
            | GhfetchError::RateLimited { .. }
            | GhfetchError::Network(_)
    )
}

fn looks_like_token(token: &str) -> bool {
    TOKEN_PREFIXES.iter().any(|p| token.starts_with(p))
}

/// Print `question` and read one trimmed line from `input`
///
/// End of input means nobody is there to answer.
fn prompt<R: BufRead>(input: &mut R, question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        println!();
        return Err(GhfetchError::Cancelled);
    }
    Ok(answer.trim().to_string())
}

fn confirm<R: BufRead>(input: &mut R, question: &str, default_yes: bool) -> Result<bool> {
    let answer = prompt(input, question)?;
    Ok(parse_yes(&answer, default_yes))
}

fn parse_yes(answer: &str, default_yes: bool) -> bool {
    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        default_yes
    } else {
        answer.starts_with('y')
    }
}
