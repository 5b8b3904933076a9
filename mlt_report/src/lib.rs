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

//! report tools for multilevel thresholding experiments: grid collages of original, histogram and
//! thresholded images, and SSIM/PSNR tables of results against their originals.
//! this mostly wraps the external 'image' and 'image_compare' crates

use std::path::Path;
use image::{self, imageops::FilterType, DynamicImage, GenericImageView};

mod errors;
pub use errors::{Result,MltReportError};

pub mod config;
pub use config::{ReportConfig, MetricsConfig, ResultDir, ComposeGroup, Method, Algorithm, ResolvePolicy, StructureAlgorithm, MetricsDir};

mod resolve;
pub use resolve::find_image;

pub mod compose;
pub use compose::{ImageSet, GridLayout, compose_grid, compiled_filename};

pub mod metrics;
pub use metrics::{Metrics, ResultRow, MetricsReport, evaluate_pair, compare_gray, psnr, structure_score, to_gray};

pub mod batch;
pub use batch::{compile_images, collect_metrics, CompileSummary};

pub fn open_image<P: AsRef<Path>> (path: P)->Result<DynamicImage> {
    Ok( image::open( path.as_ref())? )
}

/// dimensions of `img` scaled by `factor`, truncated to whole pixels
pub fn scaled_dimensions (img: &DynamicImage, factor: f64)->Result<(u32,u32)> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err( MltReportError::IllegalArgument( format!("invalid scale factor {factor}")))
    }

    let (w,h) = img.dimensions();
    let sw = (w as f64 * factor).floor();
    let sh = (h as f64 * factor).floor();

    if sw < 1.0 || sh < 1.0 || sw > u32::MAX as f64 || sh > u32::MAX as f64 {
        Err( MltReportError::IllegalArgument( format!("cannot scale {w}x{h} by {factor}")))
    } else {
        Ok( (sw as u32, sh as u32) )
    }
}

/// resize image to floor(w*factor) x floor(h*factor) using Lanczos3 resampling.
/// A factor of 1.0 just returns a copy
pub fn resize_image (img: &DynamicImage, factor: f64)->Result<DynamicImage> {
    let (w,h) = scaled_dimensions( img, factor)?;
    if (w,h) == img.dimensions() {
        Ok( img.clone() )
    } else {
        Ok( img.resize_exact( w, h, FilterType::Lanczos3) )
    }
}
