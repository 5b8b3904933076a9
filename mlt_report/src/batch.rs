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

//! the batch drivers that walk the experiment tree:
//!
//!   ❬root❭/images/❬base❭.jpg                                  source images
//!   ❬root❭/histograms/❬base❭…                                 gray level histograms of source images
//!   ❬root❭/results/❬method❭/❬algorithm❭/k❬n❭/❬base❭…            thresholded images
//!   ❬root❭/results/❬method❭/❬algorithm❭/k❬n❭/histogram/❬base❭…  histograms with thresholds
//!
//! Missing files are skipped, all other errors abort the batch

use std::path::{Path,PathBuf};
use tracing::{debug,info};
use mlt_common::fs::{ensure_writable_dir, filename, filestem, has_extension, prefixed_files_in_dir, sorted_files_in_dir};
use crate::{
    compose::{compiled_filename, compose_grid, ImageSet},
    config::{ComposeGroup, ReportConfig},
    errors::{MltReportError, Result},
    find_image, metrics::{evaluate_pair, MetricsReport, ResultRow}, open_image, resize_image
};

/// what a compile run produced
#[derive(Debug,Default)]
pub struct CompileSummary {
    pub written: Vec<PathBuf>,
    /// base names of source images without histogram
    pub skipped_sources: Vec<String>
}

/// source images in `dir` with one of the given extensions, in filename order
fn source_images (dir: &Path, extensions: &[String])->Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err( MltReportError::NotFoundError( format!("image dir {:?}", dir)))
    }
    Ok( sorted_files_in_dir( &dir)?.into_iter().filter( |p| has_extension( p, extensions)).collect() )
}

/// compile collages for all source images in the configured images dir, for each k and compose group.
/// Source images without histogram are skipped, as are (base,k,group) combinations without any result image
pub fn compile_images (root: &Path, config: &ReportConfig)->Result<CompileSummary> {
    config.check()?;

    let images_dir = root.join( &config.images_dir);
    let histograms_dir = root.join( &config.histograms_dir);
    let results_dir = root.join( &config.results_dir);
    let output_dir = root.join( &config.output_dir);
    ensure_writable_dir( &output_dir)?;

    let mut summary = CompileSummary::default();

    for src_path in source_images( &images_dir, &config.source_extensions)? {
        let Some(base) = filestem( &src_path) else { continue };

        let Some(hist_path) = find_image( base, &histograms_dir, config.resolve_policy)? else {
            debug!("no histogram for {}, skipping", base);
            summary.skipped_sources.push( base.to_string());
            continue
        };

        let original = resize_image( &open_image( &src_path)?, config.scale_factor)?;
        let histogram = open_image( &hist_path)?;

        for &k in &config.k_values {
            let mut sets: Vec<(&ComposeGroup,ImageSet)> = Vec::new();

            for group in &config.groups {
                let mut set = ImageSet::new( base, k, &original, &histogram);
                for dir in &group.dirs {
                    if let Some(path) = find_image( base, dir.path( &results_dir, k), config.resolve_policy)? {
                        let img = open_image( &path)?;
                        let img = if dir.histogram { img } else { resize_image( &img, config.scale_factor)? };
                        set.push_result( *dir, img);
                    }
                }

                if set.has_results() {
                    sets.push( (group,set) );
                } else {
                    debug!("no {} results for {} k={}", group.name, base, k);
                }
            }

            for (group, set, label) in qualified_labels( sets) {
                let path = output_dir.join( compiled_filename( base, k, &label));
                let img = compose_grid( &set.images(), config.columns, config.margin)?;
                img.save( &path)?;

                info!("compiled image saved: {:?} ({} images, group {})", path, set.len(), group.name);
                summary.written.push( path);
            }
        }
    }

    Ok(summary)
}

/// attach output labels to image sets of the same (base,k). Sets whose labels collide with the
/// label of another set are qualified with their group name so that they do not overwrite each other
fn qualified_labels<'a,'b> (sets: Vec<(&'a ComposeGroup,ImageSet<'b>)>)->Vec<(&'a ComposeGroup,ImageSet<'b>,String)> {
    let labels: Vec<String> = sets.iter().map( |(_,set)| set.label().unwrap_or_default()).collect();

    sets.into_iter().enumerate().map( |(i,(group,set))| {
        let n_same = labels.iter().filter( |l| **l == labels[i]).count();
        let label = if n_same > 1 { format!("{}_{}", group.name, labels[i]) } else { labels[i].clone() };
        (group, set, label)
    }).collect()
}

/// compute SSIM and PSNR for all (source image, result image) pairs of the configured metrics result dirs.
/// Pairs that cannot be opened are skipped. The returned report is sorted by result filename
pub fn collect_metrics (root: &Path, config: &ReportConfig)->Result<MetricsReport> {
    let metrics = &config.metrics;
    let images_dir = root.join( &config.images_dir);
    let results_dir = root.join( &config.results_dir);

    let sources = source_images( &images_dir, &metrics.source_extensions)?;
    let result_ext = [metrics.result_extension.as_str()];
    let mut report = MetricsReport::new();

    for mdir in &metrics.result_dirs {
        let dir_path = mdir.dir.path( &results_dir, mdir.k);
        if !dir_path.is_dir() {
            debug!("no result dir {:?}", dir_path);
            continue
        }

        for src_path in &sources {
            let (Some(base), Some(src_name)) = (filestem( src_path), filename( src_path)) else { continue };

            for result_path in prefixed_files_in_dir( &dir_path, base)? {
                if !has_extension( &result_path, &result_ext) { continue }
                let Some(result_name) = filename( &result_path) else { continue };

                if let Some(m) = evaluate_pair( src_path, &result_path, metrics.structure_algorithm)? {
                    debug!("{} / {}: ssim={:.4}, psnr={:.4}", src_name, result_name, m.ssim, m.psnr);
                    report.push( ResultRow {
                        original: src_name.to_string(),
                        result: result_name.to_string(),
                        ssim: m.ssim,
                        psnr: m.psnr
                    });
                }
            }
        }
    }

    report.sort_by_result();
    Ok(report)
}
