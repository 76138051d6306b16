//! Environment sources: `POSTCRAFT__SECTION__KEY` plus the well-known
//! credential variables, which take precedence over everything else.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "POSTCRAFT";

/// Well-known variables and the keys they override
pub const WELL_KNOWN: [(&str, &str); 4] = [
    ("OPENAI_API_KEY", "provider.api_key"),
    ("GOOGLE_SHEETS_SPREADSHEET_ID", "sheets.spreadsheet_id"),
    ("GOOGLE_SHEETS_CLIENT_EMAIL", "sheets.client_email"),
    ("GOOGLE_SHEETS_PRIVATE_KEY", "sheets.private_key"),
];

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    for (variable, key) in WELL_KNOWN {
        // Empty values are treated as unset.
        let value = std::env::var(variable).ok().filter(|v| !v.trim().is_empty());
        builder = builder.set_override_option(key, value)?;
    }

    Ok(builder)
}
