use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config, SearchDefaults};
use crate::filters::{normalize_brand, parse_max_price, Mode, DEFAULT_BRANDS};
use crate::filters::price_cap::PRICE_MAX;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

fn check_api_url(input: &str) -> Result<(), String> {
    match reqwest::Url::parse(input) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        Ok(url) => Err(format!("unsupported scheme '{}'", url.scheme())),
        Err(e) => Err(e.to_string()),
    }
}

/// Max-price answer: "Any" (or the top of the range) means no default cap
fn parse_price_answer(input: &str) -> Option<u32> {
    let value = parse_max_price(input);
    (value < PRICE_MAX).then_some(value)
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("SmartBuy Configuration Wizard");
    println!("=============================");
    println!();

    // 1. Service
    typewriter("SmartBuy asks a recommendation service for phones and ranks what it sends back.");
    let api_url = loop {
        let input = prompt_with_default("Service URL", crate::config::DEFAULT_API_URL)?;
        match check_api_url(&input) {
            Ok(()) => break input,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let request_timeout = loop {
        let input = prompt_with_default(
            "Request timeout (e.g. '10s', '1m')",
            crate::config::DEFAULT_REQUEST_TIMEOUT,
        )?;
        match humantime::parse_duration(&input) {
            Ok(d) if !d.is_zero() => break input,
            Ok(_) => println!("  Invalid: must be greater than zero. Try again."),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 2. Search defaults
    println!();
    let defaults = if prompt_yes_no("Set default search filters? (n searches midrange, any brand)", false)? {
        println!();
        typewriter("Modes: budget (best value for money), midrange (balanced), flagship (top-tier).");
        let mode = loop {
            let input = prompt_with_default("Default mode", Mode::default().as_str())?;
            match input.parse::<Mode>() {
                Ok(m) => break m,
                Err(e) => println!("  Invalid: {}. Try again.", e),
            }
        };

        typewriter(&format!("Brands: {}", DEFAULT_BRANDS.join(", ")));
        let brand = normalize_brand(&prompt_with_default("Default brand", "Any")?);

        let min_ram = loop {
            let input = prompt_with_default("Minimum RAM in GB (0 for none)", "0")?;
            match input.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => break (v > 0.0).then_some(v),
                _ => println!("  Invalid: must be a non-negative number. Try again."),
            }
        };

        typewriter("Max price takes a number in SGD (100-2400) or 'Any'.");
        let max_price = parse_price_answer(&prompt_with_default("Default max price", "Any")?);

        SearchDefaults {
            mode: Some(mode),
            brand,
            min_ram,
            max_price,
        }
    } else {
        SearchDefaults::default()
    };

    // 3. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 4. Write config
    let config = Config {
        api_url,
        request_timeout: Some(request_timeout),
        defaults,
        ..Config::default()
    };

    if let Err(errors) = config.validate() {
        anyhow::bail!("Generated config is invalid: {}", errors.join("; "));
    }

    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    typewriter("Category thresholds and tier messages can be tuned under 'categories:' in the config file.");
    println!("Run `smartbuy` to get started.");

    Ok(())
}
