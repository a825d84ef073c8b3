// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

mod cli;

use std::fs;
use std::process;
use clap::Parser;
use clap::CommandFactory;
use rustls::crypto::aws_lc_rs;

use wsp_common::config::AppConfigBuilder;
use wsp_common::telemetry::{error, info, setup_logging};
use wsp_provisioner::environment::KubernetesEnvironment;
use wsp_provisioner::namespace::{create_client, KubernetesNamespace};
use wsp_provisioner::provision::SecretProvisioner;

use crate::cli::{CliArgs, Commands};

#[tokio::main]
async fn main() {
    // Install the default aws_lc_rs crypto provider
    let _ = aws_lc_rs::default_provider().install_default();

    let args = CliArgs::parse();

    setup_logging();

    match &args.cmd {
        Some(Commands::Provision { namespace, environment, config }) => {
            info!(
                event = "Starting",
                version = env!("CARGO_PKG_VERSION"),
            );

            // Load configuration
            let mut builder = AppConfigBuilder::default();
            if let Some(path) = config {
                builder.with_file(&path.to_string_lossy());
            }
            let config = builder.with_env().build().unwrap_or_else(|e| {
                error!(
                    event = "Error",
                    error = %e,
                );
                process::exit(1);
            });

            // Load the environment definition assembled by the pipeline
            let raw = fs::read_to_string(environment).unwrap_or_else(|e| {
                error!(
                    event = "Error",
                    error = %e,
                );
                process::exit(1);
            });
            let mut environment: KubernetesEnvironment = serde_norway::from_str(&raw)
                .unwrap_or_else(|e| {
                    error!(
                        event = "Error",
                        error = %e,
                    );
                    process::exit(1);
                });

            // Create necessary resources
            let client = create_client().await.unwrap_or_else(|e| {
                error!(
                    event = "Error",
                    error = %e,
                );
                process::exit(1);
            });
            let namespace = KubernetesNamespace::new(client, namespace);
            let provisioner = SecretProvisioner::from_config(&config);

            // Run the provisioning pass
            provisioner
                .provision_namespace(&mut environment, &namespace)
                .await
                .unwrap_or_else(|e| {
                    error!(
                        event = "Error",
                        error = %e,
                    );
                    process::exit(1);
                });

            info!(
                event = "Provisioned",
                namespace = namespace.name(),
                pods = environment.pods_data().len(),
            );
            print!("{}", serde_norway::to_string(&environment).unwrap_or_default());
        },
        None => {
            let mut cmd = CliArgs::command();
            cmd.print_help().unwrap();
            process::exit(1);
        },
    }
}
