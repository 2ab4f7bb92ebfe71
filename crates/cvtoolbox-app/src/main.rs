// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CV Toolbox — run the fixed image pipeline and write the report.
//
// Entry point. Initialises logging, runs the pipeline with the default
// configuration and maps any failure to a non-zero exit status.

mod pipeline;

use std::process::ExitCode;

use cvtoolbox_core::ToolboxConfig;
use cvtoolbox_core::human_errors::humanize_error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ToolboxConfig::default();
    tracing::info!(?config, "CV Toolbox starting");

    match pipeline::run(&config) {
        Ok(summary) => {
            for line in summary.lines() {
                println!("{line}");
            }
            println!("All done!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "pipeline failed");
            eprintln!("{}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}
