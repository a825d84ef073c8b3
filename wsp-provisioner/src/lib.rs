// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

#[allow(unused_extern_crates)]
extern crate self as wsp_provisioner;

pub mod environment;
pub mod error;
pub mod namespace;
pub mod provision;
