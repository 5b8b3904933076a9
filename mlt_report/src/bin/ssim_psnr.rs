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

use std::path::Path;
use anyhow::Result;
use tracing::info;
use mlt_common::{define_cli, check_cli, init_tracing};
use mlt_report::{collect_metrics, ReportConfig};

define_cli! { ARGS [about="SSIM and PSNR of thresholding results against their original images"] =
    config: Option<String> [help="optional RON config file (defaults to standard experiment layout)", long, short],
    root: String [help="root directory of the experiment tree", long, short, default_value="."],
    csv: Option<String> [help="optional CSV file to store (original,result,ssim,psnr) rows", long]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config = ReportConfig::load( ARGS.config.as_ref())?;
    let report = collect_metrics( Path::new( &ARGS.root), &config)?;
    info!("evaluated {} result images", report.len());

    if let Some(csv_path) = &ARGS.csv {
        report.write_csv( csv_path)?;
        info!("result table saved: {}", csv_path);
    }

    // ready to paste into a spreadsheet column
    print!("{report}");
    Ok(())
}
