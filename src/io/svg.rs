//! # SVG pictures of fused transcripts
//!
//! Coordinates of a [`FusionLayout`] are drawn at 100 bases per millimetre. Exons are
//! 2 cm high boxes, each part gets a thin bar at 8 mm connecting its exons.
use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::{fusion::FusionLayout, intervals::IntervalSet};

const BASES_PER_MM: f64 = 100.0;
const EXON_HEIGHT_MM: f64 = 20.0;
const INTRON_Y_MM: f64 = 8.0;
const INTRON_HEIGHT_MM: f64 = 2.0;
const PRIME5_COLOR: &str = "blue";
const PRIME3_COLOR: &str = "red";

/// SVG document built up shape by shape.
#[derive(Debug, Default)]
pub struct FusionPicture {
    content: Vec<String>,
}

impl FusionPicture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layout(layout: &FusionLayout) -> Result<Self> {
        let mut picture = Self::new();
        picture.draw_exons(&layout.prime5, PRIME5_COLOR);
        picture.draw_exons(&layout.prime3, PRIME3_COLOR);
        picture.draw_intron(&layout.prime5, PRIME5_COLOR)?;
        picture.draw_intron(&layout.prime3, PRIME3_COLOR)?;
        Ok(picture)
    }

    /// Draw a rectangle, all dimensions in millimetres.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.content.push(format!(
            "<rect x=\"{x:.2}mm\" y=\"{y:.2}mm\" width=\"{width:.2}mm\" height=\"{height:.2}mm\" \
             fill=\"{color}\" stroke=\"{color}\" stroke-width=\"1\"/>"
        ));
    }

    /// Exons of one base (breakpoint markers) are not drawn.
    fn draw_exons(&mut self, exons: &IntervalSet, color: &str) {
        for iv in exons.iter().filter(|iv| iv.len() > 1) {
            let x = iv.begin as f64 / BASES_PER_MM;
            let width = ((iv.len() + 100) / 100) as f64;
            self.draw_rect(x, 0.0, width, EXON_HEIGHT_MM, color);
        }
    }

    fn draw_intron(&mut self, exons: &IntervalSet, color: &str) -> Result<()> {
        let span = exons.span()?;
        let x = span.begin as f64 / BASES_PER_MM;
        let width = span.len() as f64 / BASES_PER_MM;
        self.draw_rect(x, INTRON_Y_MM, width, INTRON_HEIGHT_MM, color);
        Ok(())
    }

    pub fn n_shapes(&self) -> usize {
        self.content.len()
    }

    pub fn render(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%">
  <rect x="0" y="0" width="100%" height="100%" fill="white" stroke="white"/>
  <g id="shapes">
    {}
  </g>
</svg>
"#,
            self.content.join("\n    ")
        )
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(&path, self.render())
            .with_context(|| format!("Could not write SVG {}", path.as_ref().display()))
    }
}

/// Render `layout` into the SVG file at `path`.
pub fn write_svg<P: AsRef<Path>>(path: P, layout: &FusionLayout) -> Result<()> {
    FusionPicture::from_layout(layout)?.save(path)
}
