// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;
use std::path::PathBuf;

mod app_state;
mod config;
mod dashboard;
mod directives;
mod records;
mod runtime_paths;
mod templates;
mod uploads;
mod util;

use app_state::AppState;
use config::ValidatedConfig;
use runtime_paths::RuntimePaths;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let runtime_root = match parse_args() {
        Ok(root) => root,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    let runtime_paths = match RuntimePaths::from_root(&runtime_root) {
        Ok(paths) => paths,
        Err(error) => {
            eprintln!("❌ Runtime directory error: {}", error);
            return 1;
        }
    };

    init_logger();

    let config = match config::load_or_create(&runtime_paths.config_file) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("❌ Configuration error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    let result = System::new().block_on(run_server(config, runtime_paths));
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

fn parse_args() -> Result<PathBuf, String> {
    let mut root = PathBuf::from(".");
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-C" => match args.next() {
                Some(value) => root = PathBuf::from(value),
                None => return Err("-C requires a directory argument".to_string()),
            },
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(root)
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
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

async fn run_server(config: ValidatedConfig, runtime_paths: RuntimePaths) -> std::io::Result<()> {
    let app_state = AppState::new(runtime_paths.clone())
        .map_err(|error| std::io::Error::other(error.to_string()))?;

    info!("Site: {}", config.site_name);
    info!("Runtime root: {}", runtime_paths.root.display());
    info!("Uploads directory: {}", runtime_paths.uploads_dir.display());
    info!(
        "{} section(s) declared: {}",
        config.sections.len(),
        config.sections.keys().cloned().collect::<Vec<_>>().join(", ")
    );

    let host = config.server.host.clone();
    let port = config.server.port;
    let state = web::Data::new(app_state);
    let config_data = web::Data::new(config);

    info!("Listening on http://{}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(config_data.clone())
            .configure(dashboard::configure)
            .route(
                "/uploads/{name}",
                web::get().to(dashboard::handlers::serve_upload),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
