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

//! configuration of the report tools. All fields have defaults that correspond to the standard
//! experiment tree layout, which means a RON config file only has to contain the values that differ:
//! ```ignore
//! ( scale_factor: 2.0, k_values: [2,3] )
//! ```

use std::{fmt, path::{Path,PathBuf}};
use serde::{Serialize,Deserialize};
use crate::errors::{Result,MltReportError};

/// the objective function used to select thresholds
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Hash)]
#[serde(rename_all="lowercase")]
pub enum Method { Otsu, Kapur }

impl Method {
    pub fn as_str (&self)->&'static str {
        match self {
            Method::Otsu => "otsu",
            Method::Kapur => "kapur"
        }
    }
}

impl fmt::Display for Method {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result { f.write_str( self.as_str()) }
}

/// the metaheuristic that optimized the objective function
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Hash)]
#[serde(rename_all="lowercase")]
pub enum Algorithm { Sa, Vns }

impl Algorithm {
    pub fn as_str (&self)->&'static str {
        match self {
            Algorithm::Sa => "sa",
            Algorithm::Vns => "vns"
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result { f.write_str( self.as_str()) }
}

/// structured descriptor of a result directory `<results>/{method}/{algorithm}/k{k}[/histogram]`
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub struct ResultDir {
    pub method: Method,
    pub algorithm: Algorithm,
    #[serde(default)]
    pub histogram: bool
}

impl ResultDir {
    pub fn new (method: Method, algorithm: Algorithm, histogram: bool)->Self {
        ResultDir { method, algorithm, histogram }
    }

    pub fn path (&self, results_dir: impl AsRef<Path>, k: u32)->PathBuf {
        let mut path = results_dir.as_ref().join( self.method.as_str()).join( self.algorithm.as_str()).join( format!("k{k}"));
        if self.histogram { path.push("histogram") }
        path
    }

    /// display label used in output filenames
    pub fn label (&self)->&'static str {
        self.algorithm.as_str()
    }
}

/// ordered list of result directories that are compiled into the same collage
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct ComposeGroup {
    pub name: String,
    pub dirs: Vec<ResultDir>
}

impl ComposeGroup {
    /// the standard group for a method: sa, sa histogram, vns, vns histogram
    pub fn for_method (method: Method)->Self {
        let dirs = vec![
            ResultDir::new( method, Algorithm::Sa, false),
            ResultDir::new( method, Algorithm::Sa, true),
            ResultDir::new( method, Algorithm::Vns, false),
            ResultDir::new( method, Algorithm::Vns, true),
        ];
        ComposeGroup { name: method.as_str().to_string(), dirs }
    }
}

/// what to do if more than one file in a directory starts with the base name
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Default)]
pub enum ResolvePolicy {
    /// first file in filename order wins
    #[default]
    First,
    /// more than one candidate is an error
    Unique
}

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Default)]
pub enum StructureAlgorithm {
    #[default]
    Mssim,
    Rms
}

impl StructureAlgorithm {
    pub fn to_compare_algorithm (&self)->image_compare::Algorithm {
        match self {
            StructureAlgorithm::Mssim => image_compare::Algorithm::MSSIMSimple,
            StructureAlgorithm::Rms => image_compare::Algorithm::RootMeanSquared
        }
    }
}

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct MetricsDir {
    pub dir: ResultDir,
    pub k: u32
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    pub result_dirs: Vec<MetricsDir>,
    pub source_extensions: Vec<String>,
    pub result_extension: String,
    pub structure_algorithm: StructureAlgorithm
}

impl Default for MetricsConfig {
    fn default()->Self {
        let result_dirs = (2..=5).map( |k| MetricsDir{ dir: ResultDir::new( Method::Kapur, Algorithm::Sa, false), k }).collect();

        MetricsConfig {
            result_dirs,
            source_extensions: vec!["jpg".to_string()],
            result_extension: "png".to_string(),
            structure_algorithm: StructureAlgorithm::default()
        }
    }
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub images_dir: PathBuf,
    pub histograms_dir: PathBuf,
    pub results_dir: PathBuf,
    pub output_dir: PathBuf,

    /// upscaling applied to non-histogram images
    pub scale_factor: f64,
    /// canvas border in pixels
    pub margin: u32,
    /// grid width
    pub columns: u32,
    /// parameter sweep
    pub k_values: Vec<u32>,

    pub source_extensions: Vec<String>,
    pub resolve_policy: ResolvePolicy,
    pub groups: Vec<ComposeGroup>,

    pub metrics: MetricsConfig
}

impl Default for ReportConfig {
    fn default()->Self {
        ReportConfig {
            images_dir: PathBuf::from("images"),
            histograms_dir: PathBuf::from("histograms"),
            results_dir: PathBuf::from("results"),
            output_dir: PathBuf::from("compiled_images"),
            scale_factor: 1.5,
            margin: 100,
            columns: 2,
            k_values: vec![2,3,4,5],
            source_extensions: vec!["jpg".to_string(), "png".to_string()],
            resolve_policy: ResolvePolicy::default(),
            groups: vec![ ComposeGroup::for_method( Method::Otsu), ComposeGroup::for_method( Method::Kapur) ],
            metrics: MetricsConfig::default()
        }
    }
}

impl ReportConfig {
    /// load from optional RON file (defaults if none) and check values
    pub fn load<P: AsRef<Path>> (opt_path: Option<P>)->Result<Self> {
        let config: ReportConfig = mlt_common::load_config_or_default( opt_path)?;
        config.check()?;
        Ok(config)
    }

    pub fn check (&self)->Result<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err( MltReportError::IllegalArgument( format!("scale_factor has to be positive: {}", self.scale_factor)))
        }
        if self.columns == 0 {
            return Err( MltReportError::IllegalArgument( "columns has to be > 0".into()))
        }
        if self.groups.iter().any( |g| g.name.is_empty()) {
            return Err( MltReportError::IllegalArgument( "compose groups need a name".into()))
        }
        Ok(())
    }
}
