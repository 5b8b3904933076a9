/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! common infrastructure for the mlt report tools: error/cli definition macros, filesystem
//! helpers, RON config loading and tracing setup

use std::path::Path;

pub mod macros;
pub mod fs;

mod errors;
pub use errors::{Result,MltCommonError};

/// load a RON config file from an explicit path
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> serde::Deserialize<'a>, P: AsRef<Path> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err( MltCommonError::ConfigNotFound( path.to_string_lossy().to_string()) )
    }

    let data = std::fs::read( path)?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// load config from optional path, falling back to `C::default()` if there is none
pub fn load_config_or_default<C,P> (opt_path: Option<P>) -> Result<C> where C: for <'a> serde::Deserialize<'a> + Default, P: AsRef<Path> {
    match opt_path {
        Some(path) => load_config_path( path),
        None => Ok( C::default() )
    }
}

/// install a global fmt subscriber that is controlled by the RUST_LOG env var (default level is `info`).
/// Note this only succeeds if there is no global subscriber set yet, which is why we ignore the result
pub fn init_tracing () {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter)
        .with_target( false)
        .with_writer( std::io::stderr) // keep stdout for tool output
        .try_init();
}
