use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let secret = require("ETL_SECRET_ID")?;
    let api_url = or_default("SALEOR_API_URL", "http://localhost:8000/graphql/");
    let excel_file_location = or_default("EXCEL_FILE_LOCATION", "");
    let excel_file_name = lookup("EXCEL_FILE_NAME")
        .ok()
        .filter(|name| !name.trim().is_empty());
    let log_level = or_default("SALEOR_ETL_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SALEOR_ETL_REQUEST_TIMEOUT_SECS", "30")?;

    let row_limit = parse_usize("SALEOR_ETL_ROW_LIMIT", "50")?;
    if row_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SALEOR_ETL_ROW_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let product_type_name = or_default("SALEOR_ETL_PRODUCT_TYPE", "Car Parts");
    let weight_unit = or_default("SALEOR_ETL_WEIGHT_UNIT", "LB").to_uppercase();

    Ok(AppConfig {
        api_url,
        secret,
        excel_file_location,
        excel_file_name,
        log_level,
        request_timeout_secs,
        row_limit,
        product_type_name,
        weight_unit,
    })
}
