/// Geometry of the result list's visible area, used to decide whether
/// enough records are loaded to overflow it.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Visible height of the scroll area.
    pub visible_height: f32,
    /// Height of one rendered record card, including spacing.
    pub card_height: f32,
    /// Cards per row in the grid.
    pub columns: u32,
}

impl Viewport {
    /// A single-column viewport showing `n` rows of unit height. Handy for
    /// list-style frontends that think in row counts.
    pub fn rows(n: u32) -> Self {
        Self {
            visible_height: n as f32,
            card_height: 1.0,
            columns: 1,
        }
    }

    /// Whether `record_count` rendered records overflow the visible area.
    /// While this is false and more pages exist, the browser keeps
    /// backfilling so the user never sees a shorter-than-viewport list.
    pub fn is_filled(&self, record_count: usize) -> bool {
        if self.columns == 0 || self.card_height <= 0.0 {
            return true;
        }
        let rows = record_count.div_ceil(self.columns as usize);
        rows as f32 * self.card_height > self.visible_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_fill_arithmetic() {
        let vp = Viewport {
            visible_height: 600.0,
            card_height: 250.0,
            columns: 4,
        };
        // Two full rows (500px) do not overflow 600px; a third row does.
        assert!(!vp.is_filled(8));
        assert!(vp.is_filled(9));
        assert!(!vp.is_filled(0));
    }

    #[test]
    fn test_rows_helper() {
        let vp = Viewport::rows(20);
        assert!(!vp.is_filled(20));
        assert!(vp.is_filled(21));
    }

    #[test]
    fn test_degenerate_viewport_counts_as_filled() {
        let vp = Viewport {
            visible_height: 600.0,
            card_height: 0.0,
            columns: 4,
        };
        assert!(vp.is_filled(0));
    }
}
