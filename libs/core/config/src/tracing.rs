use crate::{Environment, env_or_default};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main() before any fallible operations. Safe to call
/// multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter directives used when `RUST_LOG` is not set.
///
/// `LOG_LEVEL` (default `info`) sets the overall level; SQL statement logging
/// from sea-orm/sqlx is kept at `warn` unless the level is `debug` or finer.
pub fn default_directives() -> String {
    let level = env_or_default("LOG_LEVEL", "info").to_ascii_lowercase();

    match level.as_str() {
        "trace" | "debug" => level,
        _ => format!("{level},sea_orm=warn,sqlx=warn"),
    }
}

/// Initialize tracing with environment-aware configuration and error span capture.
///
/// - **Production** (`APP_ENV=production`): flattened JSON, no module targets.
/// - **Development** (default): pretty-printed.
///
/// Both include `tracing_error::ErrorLayer` so eyre reports carry span traces.
/// `RUST_LOG` overrides [`default_directives`]. Repeated calls are ignored.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!("Tracing initialized. Environment: {:?}", environment),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_without_log_level() {
        temp_env::with_var_unset("LOG_LEVEL", || {
            assert_eq!(default_directives(), "info,sea_orm=warn,sqlx=warn");
        });
    }

    #[test]
    fn test_default_directives_verbose_levels_include_sql() {
        temp_env::with_var("LOG_LEVEL", Some("DEBUG"), || {
            assert_eq!(default_directives(), "debug");
        });
    }

    #[test]
    fn test_default_directives_quiet_level() {
        temp_env::with_var("LOG_LEVEL", Some("warn"), || {
            assert_eq!(default_directives(), "warn,sea_orm=warn,sqlx=warn");
        });
    }

    #[test]
    fn test_init_tracing_multiple_calls() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_init_tracing_with_invalid_log_level() {
        temp_env::with_vars(
            [("RUST_LOG", None::<&str>), ("LOG_LEVEL", Some("not a level!"))],
            || init_tracing(&Environment::Development),
        );
    }
}
