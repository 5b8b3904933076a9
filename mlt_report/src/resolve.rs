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

use std::path::{Path,PathBuf};
use tracing::debug;
use mlt_common::fs::prefixed_files_in_dir;
use crate::{config::ResolvePolicy, errors::{Result,MltReportError}};

/// find the file in `dir` that belongs to image `base`, which is the first file (in filename order)
/// that starts with `base`. There is no extension check.
/// A missing dir or no matching file is not an error but returns `None` (callers skip the item)
pub fn find_image<P: AsRef<Path>> (base: &str, dir: P, policy: ResolvePolicy)->Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    let mut candidates = prefixed_files_in_dir( &dir, base)?;

    if candidates.len() > 1 {
        match policy {
            ResolvePolicy::First => {
                debug!("{} files in {:?} match {}, using first", candidates.len(), dir, base);
            }
            ResolvePolicy::Unique => {
                return Err( MltReportError::AmbiguousMatch( format!("{} files in {:?} start with '{}'", candidates.len(), dir, base)))
            }
        }
    }

    if candidates.is_empty() {
        Ok(None)
    } else {
        Ok( Some( candidates.swap_remove(0)) )
    }
}
