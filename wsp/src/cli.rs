// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[
    clap(
        name = "workspace-provisioner",
        version,
        author,
        about = "Secret provisioning for Kubernetes workspace environments"
    )
]
pub struct CliArgs {
    #[clap(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[
        clap(
            name = "provision",
            about = "Provision namespace secrets into an environment definition and print the result"
        )
    ]
    Provision {
        #[clap(long, short = 'n', help = "Namespace whose secrets are considered")]
        namespace: String,
        #[clap(long, short = 'e', help = "Path to the environment definition (YAML or JSON)")]
        environment: PathBuf,
        #[clap(long, short = 'c', help = "Path to an optional configuration file")]
        config: Option<PathBuf>,
    },
}
