use ratatui::layout::{Constraint, Layout, Rect};

use crate::config::{BORDER_THICKNESS, TILE_COLUMNS};
use crate::grid::GridSize;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FrameLayout {
    /// Everything above the HUD; overlays are centered here.
    pub field: Rect,
    /// Bordered play area, sized to the grid and centered above the HUD.
    pub play: Rect,
    pub status: Rect,
    pub controls: Rect,
    pub hint: Rect,
}

impl FrameLayout {
    #[must_use]
    pub fn new(area: Rect, grid: GridSize) -> Self {
        let [field, status, controls, hint] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let play_width = grid
            .width()
            .saturating_mul(TILE_COLUMNS)
            .saturating_add(BORDER_THICKNESS)
            .min(field.width);
        let play_height = grid
            .height()
            .saturating_add(BORDER_THICKNESS)
            .min(field.height);

        let play = Rect::new(
            field.x + (field.width - play_width) / 2,
            field.y + (field.height - play_height) / 2,
            play_width,
            play_height,
        );

        Self {
            field,
            play,
            status,
            controls,
            hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::grid::GridSize;

    use super::FrameLayout;

    #[test]
    fn play_area_wraps_grid_with_border() {
        let grid = GridSize::new(25, 25).expect("valid grid");
        let layout = FrameLayout::new(Rect::new(0, 0, 80, 30), grid);

        assert_eq!(layout.play, Rect::new(14, 0, 52, 27));
        assert_eq!(layout.status.y, 27);
        assert_eq!(layout.controls.y, 28);
        assert_eq!(layout.hint.y, 29);
    }

    #[test]
    fn oversized_grid_is_clipped_to_field() {
        let grid = GridSize::new(100, 100).expect("valid grid");
        let layout = FrameLayout::new(Rect::new(0, 0, 40, 20), grid);

        assert_eq!(layout.play.width, 40);
        assert_eq!(layout.play.height, 17);
    }
}
