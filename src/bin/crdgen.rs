// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CRD YAML Generator
//!
//! Writes the `DNSZone` CustomResourceDefinition derived from src/crd.rs to
//! deploy/crds/, so the manifest never drifts from the Rust types.
//!
//! Usage:
//!   cargo run --bin crdgen

use anyhow::{Context, Result};
use hostzone::crd::DNSZone;
use kube::CustomResourceExt;
use std::fs;
use std::path::Path;

const COPYRIGHT_HEADER: &str = "# Copyright (c) 2025 Erick Bourgeois, firestoned
# SPDX-License-Identifier: MIT
#
# This file is AUTO-GENERATED from src/crd.rs
# DO NOT EDIT MANUALLY - Run `cargo run --bin crdgen` to regenerate
#
";

fn main() -> Result<()> {
    let output_dir = Path::new("deploy/crds");
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    println!("Generating CRD YAML from src/crd.rs...");

    generate_crd::<DNSZone>("dnszones.crd.yaml", output_dir)?;

    println!("Next: kubectl apply -f deploy/crds/");
    Ok(())
}

fn generate_crd<T>(filename: &str, output_dir: &Path) -> Result<()>
where
    T: CustomResourceExt,
{
    let yaml = serde_yaml::to_string(&T::crd()).context("Failed to serialize CRD")?;
    let output_path = output_dir.join(filename);

    fs::write(&output_path, format!("{COPYRIGHT_HEADER}{yaml}"))
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("  Generated {}", output_path.display());
    Ok(())
}
