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

use image::{imageops, DynamicImage, GenericImageView, RgbImage, Rgba, RgbaImage};
use crate::{config::ResultDir, errors::{Result,MltReportError}};

const WHITE: Rgba<u8> = Rgba([255,255,255,255]);

/// the images compiled into one collage: original and histogram first, followed by result images
/// in the order of the result directories they were found in. This order determines grid cell placement.
pub struct ImageSet<'a> {
    pub base: &'a str,
    pub k: u32,
    original: &'a DynamicImage,
    histogram: &'a DynamicImage,
    results: Vec<(ResultDir,DynamicImage)>
}

impl <'a> ImageSet<'a> {
    pub fn new (base: &'a str, k: u32, original: &'a DynamicImage, histogram: &'a DynamicImage)->Self {
        ImageSet { base, k, original, histogram, results: Vec::new() }
    }

    pub fn push_result (&mut self, dir: ResultDir, img: DynamicImage) {
        self.results.push( (dir,img) );
    }

    pub fn len (&self)->usize { 2 + self.results.len() }

    /// do we have anything to compile beyond original and histogram
    pub fn has_results (&self)->bool { !self.results.is_empty() }

    pub fn images (&self)->Vec<&DynamicImage> {
        let mut list = Vec::with_capacity( self.len());
        list.push( self.original);
        list.push( self.histogram);
        for (_,img) in &self.results { list.push( img) }
        list
    }

    /// the de-duplicated labels of all result dirs that contributed an image, joined with '_'.
    /// Returns `None` if there are no results
    pub fn label (&self)->Option<String> {
        let mut labels: Vec<&str> = Vec::new();
        for (dir,_) in &self.results {
            let l = dir.label();
            if !labels.contains( &l) { labels.push( l) }
        }

        if labels.is_empty() { None } else { Some( labels.join("_")) }
    }
}

/// `{base}_k{k}_{label}_compiled.jpg`
pub fn compiled_filename (base: &str, k: u32, label: &str)->String {
    format!("{base}_k{k}_{label}_compiled.jpg")
}

/// uniform cell grid with fixed number of columns. All cells have the size of the largest image
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub margin: u32
}

impl GridLayout {
    pub fn new<I> (dimensions: I, columns: u32, margin: u32)->Result<Self> where I: IntoIterator<Item=(u32,u32)> {
        if columns == 0 {
            return Err( MltReportError::IllegalArgument("grid needs at least one column".into()))
        }

        let mut n: u32 = 0;
        let mut cell_width: u32 = 0;
        let mut cell_height: u32 = 0;
        for (w,h) in dimensions {
            n += 1;
            cell_width = cell_width.max(w);
            cell_height = cell_height.max(h);
        }

        if n == 0 {
            return Err( MltReportError::IllegalArgument("no images to lay out".into()))
        }

        let rows = n.div_ceil( columns);
        Ok( GridLayout { columns, rows, cell_width, cell_height, margin } )
    }

    /// total canvas size including margins
    pub fn canvas_size (&self)->Result<(u32,u32)> {
        let border = self.margin.checked_mul(2);
        let w = self.columns.checked_mul( self.cell_width).zip( border).and_then( |(w,b)| w.checked_add( b));
        let h = self.rows.checked_mul( self.cell_height).zip( border).and_then( |(h,b)| h.checked_add( b));

        match (w,h) {
            (Some(w),Some(h)) => Ok( (w,h) ),
            _ => Err( MltReportError::InvalidDimensions( format!("canvas too large for {}x{} cells of {}x{}", self.columns, self.rows, self.cell_width, self.cell_height)))
        }
    }

    /// upper left corner of an image with given dimensions that is centered in cell `index` (row major)
    pub fn image_offset (&self, index: usize, dim: (u32,u32))->(i64,i64) {
        let index = index as i64;
        let columns = self.columns as i64;
        let (cw, ch) = (self.cell_width as i64, self.cell_height as i64);
        let margin = self.margin as i64;

        let row = index / columns;
        let col = index % columns;

        let x = margin + col * cw + (cw - dim.0 as i64) / 2;
        let y = margin + row * ch + (ch - dim.1 as i64) / 2;
        (x,y)
    }
}

/// paste `images` centered into the cells of a white canvas. Transparent images are blended over
/// the background, i.e. the result is a flat RGB image
pub fn compose_grid (images: &[&DynamicImage], columns: u32, margin: u32)->Result<RgbImage> {
    let layout = GridLayout::new( images.iter().map( |img| img.dimensions()), columns, margin)?;
    let (width, height) = layout.canvas_size()?;

    let mut canvas = RgbaImage::from_pixel( width, height, WHITE);
    for (i, img) in images.iter().enumerate() {
        let (x,y) = layout.image_offset( i, img.dimensions());
        imageops::overlay( &mut canvas, &img.to_rgba8(), x, y);
    }

    Ok( DynamicImage::ImageRgba8( canvas).to_rgb8() )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, GrayImage, Luma};
    use crate::config::{Method, Algorithm};

    fn rgb (w: u32, h: u32, c: [u8;3])->DynamicImage {
        DynamicImage::ImageRgb8( RgbImage::from_pixel( w, h, Rgb(c)))
    }

    #[test]
    fn test_layout() {
        let layout = GridLayout::new( vec![(30,20), (10,40), (25,25)], 2, 100).unwrap();
        assert_eq!( layout.rows, 2);
        assert_eq!( (layout.cell_width, layout.cell_height), (30, 40));
        assert_eq!( layout.canvas_size().unwrap(), (2*30 + 200, 2*40 + 200));

        assert_eq!( layout.image_offset( 0, (30,20)), (100, 100 + 10));
        assert_eq!( layout.image_offset( 1, (10,40)), (100 + 30 + 10, 100));
        assert_eq!( layout.image_offset( 2, (25,25)), (100 + 2, 100 + 40 + 7));
    }

    #[test]
    fn test_rows_generalize() {
        let dims = vec![(10,10); 7];
        let layout = GridLayout::new( dims.clone(), 2, 100).unwrap();
        assert_eq!( layout.rows, 4);
        assert_eq!( layout.canvas_size().unwrap(), (220, 240));

        let layout = GridLayout::new( dims, 3, 0).unwrap();
        assert_eq!( layout.rows, 3);
        assert_eq!( layout.canvas_size().unwrap(), (30, 30));

        assert!( GridLayout::new( Vec::<(u32,u32)>::new(), 2, 100).is_err());
        assert!( GridLayout::new( vec![(1,1)], 0, 100).is_err());
    }

    #[test]
    fn test_compose() {
        let red = rgb( 20, 10, [255,0,0]);
        let gray = DynamicImage::ImageLuma8( GrayImage::from_pixel( 10, 30, Luma([0])));
        let blue = rgb( 20, 30, [0,0,255]);

        let canvas = compose_grid( &[&red, &gray, &blue], 2, 5).unwrap();
        assert_eq!( canvas.dimensions(), (2*20 + 10, 2*30 + 10));

        assert_eq!( canvas.get_pixel( 0, 0), &Rgb([255,255,255])); // margin
        assert_eq!( canvas.get_pixel( 5 + 10, 5 + 15), &Rgb([255,0,0])); // red centered vertically in cell 0
        assert_eq!( canvas.get_pixel( 5, 5), &Rgb([255,255,255])); // above red
        assert_eq!( canvas.get_pixel( 5 + 20 + 10, 5 + 15), &Rgb([0,0,0])); // gray in cell 1
        assert_eq!( canvas.get_pixel( 5 + 20 + 2, 5 + 15), &Rgb([255,255,255])); // left of gray
        assert_eq!( canvas.get_pixel( 5 + 10, 5 + 30 + 15), &Rgb([0,0,255])); // blue in cell 2
        assert_eq!( canvas.get_pixel( 5 + 20 + 10, 5 + 30 + 15), &Rgb([255,255,255])); // empty cell 3
    }

    #[test]
    fn test_transparent_flattened() {
        let clear = DynamicImage::ImageRgba8( RgbaImage::from_pixel( 10, 10, Rgba([0,0,0,0])));
        let canvas = compose_grid( &[&clear], 1, 0).unwrap();
        assert_eq!( canvas.get_pixel( 5, 5), &Rgb([255,255,255]));
    }

    #[test]
    fn test_image_set_label() {
        let orig = rgb( 4, 4, [0,0,0]);
        let hist = rgb( 4, 4, [0,0,0]);
        let mut set = ImageSet::new( "cat", 2, &orig, &hist);
        assert!( !set.has_results());
        assert_eq!( set.len(), 2);
        assert_eq!( set.label(), None);

        set.push_result( ResultDir::new( Method::Otsu, Algorithm::Sa, false), rgb( 4, 4, [1,1,1]));
        assert_eq!( set.label(), Some("sa".to_string()));

        set.push_result( ResultDir::new( Method::Otsu, Algorithm::Sa, true), rgb( 4, 4, [1,1,1]));
        set.push_result( ResultDir::new( Method::Otsu, Algorithm::Vns, false), rgb( 4, 4, [1,1,1]));
        assert_eq!( set.label(), Some("sa_vns".to_string()));
        assert_eq!( set.images().len(), 5);

        assert_eq!( compiled_filename( set.base, set.k, "sa"), "cat_k2_sa_compiled.jpg");
    }
}
