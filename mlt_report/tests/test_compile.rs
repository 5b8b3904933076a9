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

#![allow(unused)]

use std::{fs, path::Path};
use image::{GenericImageView, Rgb, RgbImage};
use mlt_report::{compile_images, ReportConfig, ResolvePolicy, MltReportError};

// run with "cargo test --test test_compile -- --nocapture"

const RED: [u8;3] = [255,0,0];
const BLACK: [u8;3] = [0,0,0];
const BLUE: [u8;3] = [0,0,255];
const WHITE: [u8;3] = [255,255,255];

fn save_solid (root: &Path, rel_path: &str, w: u32, h: u32, c: [u8;3]) {
    let path = root.join( rel_path);
    fs::create_dir_all( path.parent().unwrap()).unwrap();
    RgbImage::from_pixel( w, h, Rgb(c)).save( &path).unwrap();
}

fn assert_close (img: &RgbImage, x: u32, y: u32, c: [u8;3]) {
    let p = img.get_pixel( x, y);
    for i in 0..3 {
        assert!( (p[i] as i32 - c[i] as i32).abs() < 40, "pixel ({x},{y}) = {p:?}, expected ~{c:?}");
    }
}

fn output_files (root: &Path)->Vec<String> {
    let mut list: Vec<String> = fs::read_dir( root.join("compiled_images")).unwrap()
        .map( |e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    list.sort();
    list
}

#[test]
fn test_compile_single_result() {
    println!("\n--- test_compile_single_result");
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    save_solid( root, "images/cat.jpg", 40, 30, RED);
    save_solid( root, "histograms/cat_hist.png", 50, 20, BLACK);
    save_solid( root, "results/otsu/sa/k2/cat_thresh.png", 40, 30, BLUE);

    let summary = compile_images( root, &ReportConfig::default()).unwrap();
    println!("{summary:?}");

    let out_path = root.join("compiled_images/cat_k2_sa_compiled.jpg");
    assert_eq!( summary.written, vec![out_path.clone()]);
    assert_eq!( output_files( root), vec!["cat_k2_sa_compiled.jpg"]);

    // 3 images: original (60x45), histogram (50x20), result (60x45) -> cells of 60x45 in 2 rows
    let img = image::open( &out_path).unwrap().to_rgb8();
    assert_eq!( img.dimensions(), (2*60 + 200, 2*45 + 200));

    assert_close( &img, 50, 50, WHITE);       // margin
    assert_close( &img, 130, 122, RED);       // original in cell 0
    assert_close( &img, 190, 122, BLACK);     // histogram centered in cell 1
    assert_close( &img, 190, 100, WHITE);     // above the (lower) histogram
    assert_close( &img, 130, 167, BLUE);      // result in cell 2
    assert_close( &img, 190, 167, WHITE);     // no 4th image
}

#[test]
fn test_no_histogram() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    save_solid( root, "images/dog.jpg", 20, 20, RED);
    save_solid( root, "results/otsu/sa/k2/dog_thresh.png", 20, 20, BLUE);

    let summary = compile_images( root, &ReportConfig::default()).unwrap();
    assert!( summary.written.is_empty());
    assert_eq!( summary.skipped_sources, vec!["dog".to_string()]);
    assert!( output_files( root).is_empty());
}

#[test]
fn test_no_results() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    save_solid( root, "images/cat.png", 20, 20, RED);
    save_solid( root, "histograms/cat_hist.png", 20, 20, BLACK);
    fs::create_dir_all( root.join("results/otsu/sa/k2")).unwrap();

    let summary = compile_images( root, &ReportConfig::default()).unwrap();
    assert!( summary.written.is_empty());
    assert!( summary.skipped_sources.is_empty());
    assert!( output_files( root).is_empty());
}

#[test]
fn test_unscaled_result_histogram() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    save_solid( root, "images/cat.jpg", 40, 30, RED);
    save_solid( root, "histograms/cat_hist.png", 50, 20, BLACK);
    save_solid( root, "results/otsu/sa/k3/cat_thresh.png", 40, 30, BLUE);
    save_solid( root, "results/otsu/sa/k3/histogram/cat_thresh_hist.png", 100, 80, BLACK);
    fs::write( root.join("images/readme.txt"), b"not an image").unwrap();

    let summary = compile_images( root, &ReportConfig::default()).unwrap();
    assert_eq!( output_files( root), vec!["cat_k3_sa_compiled.jpg"]);

    // cell size is determined by the unscaled 100x80 result histogram
    let img = image::open( &summary.written[0]).unwrap();
    assert_eq!( img.dimensions(), (2*100 + 200, 2*80 + 200));
}

#[test]
fn test_multiple_algorithms() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    save_solid( root, "images/cat.jpg", 20, 20, RED);
    save_solid( root, "histograms/cat_hist.png", 20, 20, BLACK);
    save_solid( root, "results/otsu/sa/k2/cat_r.png", 20, 20, BLUE);
    save_solid( root, "results/otsu/sa/k2/histogram/cat_h.png", 20, 20, BLACK);
    save_solid( root, "results/otsu/vns/k2/cat_r.png", 20, 20, BLUE);
    save_solid( root, "results/otsu/vns/k2/histogram/cat_h.png", 20, 20, BLACK);

    let summary = compile_images( root, &ReportConfig::default()).unwrap();
    assert_eq!( output_files( root), vec!["cat_k2_sa_vns_compiled.jpg"]);

    // 6 images in 3 rows of 30x30 cells
    let img = image::open( &summary.written[0]).unwrap();
    assert_eq!( img.dimensions(), (2*30 + 200, 3*30 + 200));
}

#[test]
fn test_group_label_collision() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    save_solid( root, "images/cat.jpg", 20, 20, RED);
    save_solid( root, "histograms/cat_hist.png", 20, 20, BLACK);
    save_solid( root, "results/otsu/sa/k4/cat_r.png", 20, 20, BLUE);
    save_solid( root, "results/kapur/sa/k4/cat_r.png", 20, 20, BLUE);
    save_solid( root, "results/kapur/vns/k5/cat_r.png", 20, 20, BLUE);

    let summary = compile_images( root, &ReportConfig::default()).unwrap();
    assert_eq!( summary.written.len(), 3);
    assert_eq!( output_files( root), vec![
        "cat_k4_kapur_sa_compiled.jpg",
        "cat_k4_otsu_sa_compiled.jpg",
        "cat_k5_vns_compiled.jpg"
    ]);
}

#[test]
fn test_ambiguous_histogram() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    save_solid( root, "images/cat.jpg", 20, 20, RED);
    save_solid( root, "histograms/cat_hist.png", 20, 20, BLACK);
    save_solid( root, "histograms/catfish_hist.png", 20, 20, BLACK);
    save_solid( root, "results/otsu/sa/k2/cat_r.png", 20, 20, BLUE);

    // first match wins by default
    let summary = compile_images( root, &ReportConfig::default()).unwrap();
    assert_eq!( summary.written.len(), 1);

    let config = ReportConfig { resolve_policy: ResolvePolicy::Unique, ..ReportConfig::default() };
    let res = compile_images( root, &config);
    assert!( matches!( res, Err(MltReportError::AmbiguousMatch(_))));
}

#[test]
fn test_corrupt_result_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    save_solid( root, "images/cat.jpg", 20, 20, RED);
    save_solid( root, "histograms/cat_hist.png", 20, 20, BLACK);
    fs::create_dir_all( root.join("results/otsu/sa/k2")).unwrap();
    fs::write( root.join("results/otsu/sa/k2/cat_r.png"), b"garbage").unwrap();

    assert!( compile_images( root, &ReportConfig::default()).is_err());
}

#[test]
fn test_missing_images_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let res = compile_images( tmp.path(), &ReportConfig::default());
    assert!( matches!( res, Err(MltReportError::NotFoundError(_))));
}
