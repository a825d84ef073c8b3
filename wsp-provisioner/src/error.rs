// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("failed to query secrets: {0}")]
    KubeError(#[from] kube::Error),
    #[error("missing object key: {0}")]
    MissingObjectKeyError(&'static str),
    #[error("secret `{secret}` declares a file mount with an empty mountPath")]
    EmptyMountPathError { secret: String },
}

pub type Result<T> = result::Result<T, ProvisionError>;
