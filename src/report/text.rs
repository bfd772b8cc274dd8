//! Human-readable report formatting.

use std::fmt;

use crate::analysis::Analysis;

/// Width of the `=` rules framing each analysis.
const RULE_WIDTH: usize = 50;

/// Terminal rendering of one or more analyses.
#[derive(Clone, Copy, Debug)]
pub struct TextReport<'a> {
    analyses: &'a [Analysis],
    list_regions: bool,
}

impl<'a> TextReport<'a> {
    pub fn new(analyses: &'a [Analysis], list_regions: bool) -> Self {
        Self {
            analyses,
            list_regions,
        }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        for analysis in self.analyses {
            let d = &analysis.descriptor;

            writeln!(f)?;
            writeln!(f, "{rule}")?;
            writeln!(f, "ANALYZING: {}", analysis.path.display())?;
            writeln!(f, "{rule}")?;
            writeln!(f)?;
            writeln!(
                f,
                "DIMENSIONS: {}x{}px",
                d.dimensions.width, d.dimensions.height
            )?;
            writeln!(f, "TEXT REGIONS: {} areas detected", d.text_regions.len())?;
            if self.list_regions {
                for (i, region) in d.text_regions.iter().enumerate() {
                    writeln!(f, "  {:>3}. {}", i + 1, region)?;
                }
            }
            if let Some(marker) = &d.marker {
                writeln!(f, "QR CODE: Found at ({}, {})", marker.x, marker.y)?;
            }
            writeln!(
                f,
                "LAYOUT TYPE: {}",
                d.layout_type.as_str().to_ascii_uppercase()
            )?;
            writeln!(f, "{rule}")?;
        }

        Ok(())
    }
}
