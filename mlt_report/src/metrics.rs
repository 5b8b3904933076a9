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

use std::{fmt, path::Path};
use image::{DynamicImage, GrayImage, Luma};
use serde::Serialize;
use tracing::warn;
use crate::{config::StructureAlgorithm, errors::{Result,MltReportError}};

const MAX_PIXEL_VALUE: f64 = 255.0;

// BT.601 luma weights in 14bit fixed point (sum is 1<<14)
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Metrics {
    pub ssim: f64,
    pub psnr: f64
}

/// windowed structural similarity of two equally sized gray images (1.0 for identical images).
/// `Mssim` averages over non-overlapping 8x8 blocks, so values differ slightly (in the 2nd or 3rd decimal)
/// from implementations that use a sliding 7x7 window with sample covariance
pub fn structure_score (img1: &GrayImage, img2: &GrayImage, algorithm: StructureAlgorithm)->Result<f64> {
    let sim = image_compare::gray_similarity_structure( &algorithm.to_compare_algorithm(), img1, img2)?;
    Ok( sim.score )
}

/// peak signal to noise ratio in dB for 8bit gray images. Identical images yield `f64::INFINITY`
pub fn psnr (img1: &GrayImage, img2: &GrayImage)->Result<f64> {
    check_equal_dimensions( img1, img2)?;

    let n = img1.as_raw().len();
    if n == 0 {
        return Err( MltReportError::InsufficientData("empty image".into()))
    }

    let sum_sq: f64 = img1.as_raw().iter().zip( img2.as_raw().iter())
        .map( |(a,b)| { let d = *a as f64 - *b as f64; d*d })
        .sum();
    let mse = sum_sq / n as f64;

    if mse == 0.0 {
        Ok( f64::INFINITY )
    } else {
        Ok( 10.0 * (MAX_PIXEL_VALUE * MAX_PIXEL_VALUE / mse).log10() )
    }
}

/// 8bit gray conversion with BT.601 weights (0.299, 0.587, 0.114), rounded to nearest.
/// Note `DynamicImage::to_luma8` would use Rec.709 weights instead
pub fn to_gray (img: &DynamicImage)->GrayImage {
    if let DynamicImage::ImageLuma8(gray) = img {
        return gray.clone()
    }

    let rgb = img.to_rgb8();
    GrayImage::from_fn( rgb.width(), rgb.height(), |x,y| {
        let [r,g,b] = rgb.get_pixel( x, y).0;
        let v = (r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT + (1 << (LUMA_SHIFT-1))) >> LUMA_SHIFT;
        Luma([v as u8])
    })
}

pub fn check_equal_dimensions (img1: &GrayImage, img2: &GrayImage)->Result<()> {
    if img1.dimensions() != img2.dimensions() {
        let (w1,h1) = img1.dimensions();
        let (w2,h2) = img2.dimensions();
        Err( MltReportError::InvalidDimensions( format!("image dimensions differ: {w1}x{h1} vs {w2}x{h2}")) )
    } else {
        Ok(())
    }
}

pub fn compare_gray (img1: &GrayImage, img2: &GrayImage, algorithm: StructureAlgorithm)->Result<Metrics> {
    check_equal_dimensions( img1, img2)?;

    let ssim = structure_score( img1, img2, algorithm)?;
    let psnr = psnr( img1, img2)?;
    Ok( Metrics{ ssim, psnr } )
}

/// load both images as 8bit (BT.601) grayscale and compute their metrics.
/// If one of the images cannot be opened this returns `Ok(None)`, which tells the caller to skip the pair.
/// Images that have different dimensions are reported as error
pub fn evaluate_pair<P,Q> (original: P, result: Q, algorithm: StructureAlgorithm)->Result<Option<Metrics>> where P: AsRef<Path>, Q: AsRef<Path> {
    let original = original.as_ref();
    let result = result.as_ref();

    let (img1, img2) = match (image::open( original), image::open( result)) {
        (Ok(img1), Ok(img2)) => (to_gray( &img1), to_gray( &img2)),
        (res1, res2) => {
            let reason = res1.err().or( res2.err()).map( |e| e.to_string()).unwrap_or_default();
            warn!("could not open one of the images: {:?} or {:?} ({})", original, result, reason);
            return Ok(None)
        }
    };

    Ok( Some( compare_gray( &img1, &img2, algorithm)?) )
}

/// one evaluated (original,result) pair
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct ResultRow {
    pub original: String,
    pub result: String,
    pub ssim: f64,
    pub psnr: f64
}

#[derive(Debug,Clone,Default)]
pub struct MetricsReport {
    pub rows: Vec<ResultRow>
}

impl MetricsReport {
    pub fn new ()->Self { MetricsReport { rows: Vec::new() } }

    pub fn push (&mut self, row: ResultRow) { self.rows.push( row) }

    pub fn len (&self)->usize { self.rows.len() }

    pub fn is_empty (&self)->bool { self.rows.is_empty() }

    /// stable sort by result filename
    pub fn sort_by_result (&mut self) {
        self.rows.sort_by( |a,b| a.result.cmp( &b.result));
    }

    pub fn ssim_values (&self)->Vec<f64> { self.rows.iter().map( |r| r.ssim).collect() }

    pub fn psnr_values (&self)->Vec<f64> { self.rows.iter().map( |r| r.psnr).collect() }

    pub fn write_csv<P: AsRef<Path>> (&self, path: P)->Result<()> {
        let mut writer = csv::Writer::from_path( path.as_ref())?;
        for row in &self.rows {
            writer.serialize( row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_block (f: &mut fmt::Formatter<'_>, title: &str, values: &[f64])->fmt::Result {
    writeln!( f, "{title}")?;
    for v in values {
        writeln!( f, "{v:.4}")?;
    }
    Ok(())
}

/// two blocks of values (SSIM, PSNR) with 4 decimals, one value per line, separated by an empty line
impl fmt::Display for MetricsReport {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write_block( f, "SSIM", &self.ssim_values())?;
        writeln!(f)?;
        write_block( f, "PSNR", &self.psnr_values())
    }
}
