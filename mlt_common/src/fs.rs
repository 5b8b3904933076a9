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

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path,PathBuf};

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

pub fn filestem <'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

/// case insensitive check if path has one of the provided extensions (given without leading '.')
pub fn has_extension<T: AsRef<Path>, S: AsRef<str>> (path: &T, extensions: &[S])->bool {
    match extension( path) {
        Some(ext) => extensions.iter().any( |e| e.as_ref().eq_ignore_ascii_case( ext)),
        None => false
    }
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(ErrorKind::PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

/// all regular files in `dir`, sorted by filename. A non-existing dir is reported as NotFound error
pub fn sorted_files_in_dir<P: AsRef<Path>> (dir: &P) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    if !dir.is_dir() {
        return Err( io_error!(ErrorKind::NotFound, "dir {:?}", dir))
    }

    let mut list: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() { list.push( path) }
    }
    list.sort_by( |a,b| a.file_name().cmp( &b.file_name()));

    Ok(list)
}

/// regular files in `dir` with names starting with `prefix` (sorted by filename).
/// Returns an empty list if `dir` does not exist
pub fn prefixed_files_in_dir<P: AsRef<Path>> (dir: &P, prefix: &str) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    if !dir.is_dir() { return Ok( Vec::new()) }

    let files = sorted_files_in_dir( &dir)?;
    Ok( files.into_iter().filter( |p| filename(p).is_some_and( |fname| fname.starts_with( prefix))).collect() )
}
