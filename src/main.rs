// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;
use std::sync::Arc;

use stockroom::api;
use stockroom::app_state::AppState;
use stockroom::auth::{BearerAuthMiddlewareFactory, TokenService};
use stockroom::bootstrap::{self, BootstrapResult};
use stockroom::config::ValidatedConfig;
use stockroom::runtime_paths::RuntimePaths;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if parsed_args.show_help {
        print!("{}", help_text());
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    match System::new().block_on(run_server(bootstrap)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

async fn run_server(bootstrap: BootstrapResult) -> std::io::Result<()> {
    let validated_config = Arc::new(bootstrap.validated_config);
    let runtime_paths = bootstrap.runtime_paths;

    init_logger(&validated_config.logging.level);
    log_startup_info(&validated_config, &runtime_paths);

    let app_state = match AppState::open(&runtime_paths) {
        Ok(state) => state,
        Err(error) => {
            eprintln!("❌ Failed to open document store: {}", error);
            return Err(std::io::Error::other(error.to_string()));
        }
    };
    info!("✅ Document store opened successfully");

    let app_state = web::Data::new(app_state);
    let token_service = web::Data::new(TokenService::new(
        &validated_config.auth.jwt_secret,
        validated_config.auth.token_ttl_minutes,
    ));
    let config_data = web::Data::from(validated_config.clone());
    let workers = validated_config.server.workers;

    HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .app_data(app_state.clone())
            .app_data(token_service.clone())
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
            ))
            .wrap(BearerAuthMiddlewareFactory)
            .configure(api::configure)
    })
    .workers(workers)
    .bind(validated_config.address_tuple())?
    .run()
    .await
}

fn init_logger(level: &str) {
    let log_level = match level {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    // Stable log line format shared by app and request logging
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn log_startup_info(config: &ValidatedConfig, runtime_paths: &RuntimePaths) {
    info!("Starting {} - {}", config.app.name, config.app.description);
    info!("Workers: {}", config.server.workers);
    info!(
        "Listening on http://{}:{}",
        config.server.host, config.server.port
    );
    info!("Runtime root: {}", runtime_paths.root.display());
    info!("Config file: {}", runtime_paths.config_file.display());
    info!("Data directory: {}", runtime_paths.data_dir.display());
}

fn help_text() -> String {
    [
        "stockroom - inventory backend for devices, items, and tags",
        "",
        "Usage: stockroom [-C <root>]",
        "",
        "  -C <root>   runtime directory (default: current directory)",
        "  -h, --help  show this help",
        "",
    ]
    .join("\n")
}

struct ParsedArgs {
    runtime_root: std::path::PathBuf,
    show_help: bool,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut runtime_root = std::path::PathBuf::from(".");
    let mut show_help = false;

    while let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" || arg == "help" {
            show_help = true;
        } else if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = std::path::PathBuf::from(value);
        } else {
            return Err(format!("Unknown argument: {}", arg));
        }
    }

    let runtime_root = make_runtime_root_absolute(runtime_root)?;

    Ok(ParsedArgs {
        runtime_root,
        show_help,
    })
}

fn make_runtime_root_absolute(
    runtime_root: std::path::PathBuf,
) -> Result<std::path::PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root);
    }

    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}
