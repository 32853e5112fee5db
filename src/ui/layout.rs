use ratatui::layout::Rect;

/// Regions of the typing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingRegions {
    pub paragraph: Rect,
    pub wpm: Rect,
    pub input: Rect,
    pub skip: Rect,
}

/// Regions of the stats screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsRegions {
    pub stats: Rect,
    pub average_wpm: Rect,
    pub hint: Rect,
}

/// Rectangle spanning the inclusive corners (x0, y0) and (x1, y1), clipped
/// to `area`. Degenerate corners give an empty rectangle.
fn span(area: Rect, x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
    let clamp = |v: i32, lo: u16, hi: u16| v.clamp(lo as i32, hi as i32) as u16;
    let (left, right) = (area.left(), area.right());
    let (top, bottom) = (area.top(), area.bottom());

    let x0 = clamp(area.x as i32 + x0, left, right);
    let y0 = clamp(area.y as i32 + y0, top, bottom);
    let x1 = clamp(area.x as i32 + x1 + 1, left, right);
    let y1 = clamp(area.y as i32 + y1 + 1, top, bottom);

    Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

pub fn typing_regions(area: Rect) -> TypingRegions {
    let max_x = area.width as i32;
    let max_y = area.height as i32;
    let paragraph_bottom = max_y - max_y / 4;

    TypingRegions {
        paragraph: span(area, 0, 0, max_x - 1, paragraph_bottom),
        wpm: span(
            area,
            max_x - 10,
            paragraph_bottom - 3,
            max_x - 2,
            paragraph_bottom - 1,
        ),
        input: span(
            area,
            0,
            paragraph_bottom + 2,
            max_x - 1,
            paragraph_bottom + 5,
        ),
        skip: span(area, 1, paragraph_bottom - 2, max_x / 4, paragraph_bottom),
    }
}

pub fn stats_regions(area: Rect) -> StatsRegions {
    let max_x = area.width as i32;
    let max_y = area.height as i32;

    StatsRegions {
        stats: span(area, 0, 0, max_x - 1, max_y - 1),
        average_wpm: span(area, max_x - 10, 1, max_x - 2, 3),
        hint: span(area, max_x / 2, max_y - 3, max_x - 1, max_y - 1),
    }
}

/// Centered sub-rectangle covering `percent` of each dimension
pub fn scaled(area: Rect, percent: u16) -> Rect {
    let percent = u32::from(percent.min(100));
    let width = (u32::from(area.width) * percent / 100) as u16;
    let height = (u32::from(area.height) * percent / 100) as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_regions_80x24() {
        let r = typing_regions(Rect::new(0, 0, 80, 24));
        assert_eq!(r.paragraph, Rect::new(0, 0, 80, 19));
        assert_eq!(r.wpm, Rect::new(70, 15, 9, 3));
        assert_eq!(r.input, Rect::new(0, 20, 80, 4));
        assert_eq!(r.skip, Rect::new(1, 16, 20, 3));
    }

    #[test]
    fn test_stats_regions_80x24() {
        let r = stats_regions(Rect::new(0, 0, 80, 24));
        assert_eq!(r.stats, Rect::new(0, 0, 80, 24));
        assert_eq!(r.average_wpm, Rect::new(70, 1, 9, 3));
        assert_eq!(r.hint, Rect::new(40, 21, 40, 3));
    }

    #[test]
    fn test_regions_stay_inside_tiny_area() {
        let area = Rect::new(0, 0, 6, 3);
        let r = typing_regions(area);
        for rect in [r.paragraph, r.wpm, r.input, r.skip] {
            assert_eq!(rect.intersection(area), rect);
        }
        let s = stats_regions(area);
        for rect in [s.stats, s.average_wpm, s.hint] {
            assert_eq!(rect.intersection(area), rect);
        }
    }

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(Rect::new(0, 0, 100, 50), 90), Rect::new(5, 2, 90, 45));
    }
}
