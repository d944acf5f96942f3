use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Cycle colours: cycle index → Color32
// ---------------------------------------------------------------------------

/// One colour per cycle repetition in the cycle-overlay scatter.
#[derive(Debug, Clone)]
pub struct CycleColors {
    first_index: i64,
    palette: Vec<Color32>,
}

impl CycleColors {
    /// Build colours for every cycle index in `first..=last`.
    pub fn new(first: i64, last: i64) -> Self {
        let n = (last - first + 1).max(0) as usize;
        CycleColors {
            first_index: first,
            palette: generate_palette(n),
        }
    }

    pub fn len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    pub fn color_for(&self, cycle_index: i64) -> Color32 {
        usize::try_from(cycle_index - self.first_index)
            .ok()
            .and_then(|i| self.palette.get(i))
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
