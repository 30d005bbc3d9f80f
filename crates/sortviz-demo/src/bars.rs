#![forbid(unsafe_code)]

//! Bar chart layout and drawing.
//!
//! [`layout`] is pure: it turns a sequence and its highlights into positioned
//! columns for a given area. [`draw`] writes those columns with crossterm.
//! When there are more values than terminal columns, neighbouring values
//! share a column showing the tallest of them.

use std::io::{self, Write};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, queue};
use sortviz_core::{Highlight, HighlightSet};

/// Show values under the bars at or below this many bars.
pub const LABEL_MAX_BARS: usize = 20;

const BLOCK: char = '█';

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One drawn column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    /// Left edge, absolute.
    pub x: u16,
    pub width: u16,
    /// Filled cells, counted up from the bottom of the bar area.
    pub height: u16,
    pub value: u32,
    pub state: Option<Highlight>,
}

/// Positioned bars plus where their labels go, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chart {
    pub bars: Vec<Bar>,
    /// Bottom row of the bars.
    pub baseline: u16,
    /// Row for value labels when they are shown.
    pub label_row: Option<u16>,
}

/// Fit `values` into `area`, tallest value filling the full height.
pub fn layout(values: &[u32], highlights: &HighlightSet, area: Area) -> Chart {
    if values.is_empty() || area.width == 0 || area.height == 0 {
        return Chart::default();
    }

    let n = values.len();
    let columns = n.min(usize::from(area.width));
    let slot = area.width / columns as u16;
    let (bar_width, gap) = if slot >= 3 { (slot - 1, 1) } else { (slot, 0) };

    let widest_label = values.iter().map(|v| digits(*v)).max().unwrap_or(1);
    let labels = n <= LABEL_MAX_BARS && bar_width >= widest_label && area.height >= 2;
    let bar_rows = if labels { area.height - 1 } else { area.height };
    let tallest = values.iter().copied().max().unwrap_or(0);

    let bars = (0..columns)
        .map(|c| {
            let range = (c * n / columns)..((c + 1) * n / columns);
            let (value, state) = range.clone().fold((0u32, None), |(max, state), i| {
                (max.max(values[i]), state.or(highlights.state_of(i)))
            });
            Bar {
                x: area.x + c as u16 * (bar_width + gap),
                width: bar_width,
                height: scale(value, tallest, bar_rows),
                value,
                state,
            }
        })
        .collect();

    Chart {
        bars,
        baseline: area.y + bar_rows - 1,
        label_row: labels.then_some(area.y + area.height - 1),
    }
}

/// Cells for `value` when `tallest` fills `rows`. Non-zero values always get
/// at least one cell.
fn scale(value: u32, tallest: u32, rows: u16) -> u16 {
    if tallest == 0 {
        return 0;
    }
    let cells = (u64::from(value) * u64::from(rows)).div_ceil(u64::from(tallest));
    cells.min(u64::from(rows)) as u16
}

fn digits(value: u32) -> u16 {
    value.checked_ilog10().map_or(1, |d| d as u16 + 1)
}

/// Color for a highlight state.
pub fn color(state: Option<Highlight>) -> Color {
    match state {
        None => Color::Cyan,
        Some(Highlight::Comparing) => Color::Yellow,
        Some(Highlight::Swapping) => Color::Red,
        Some(Highlight::Pivot) => Color::Magenta,
        Some(Highlight::Sorted) => Color::Green,
    }
}

/// Queue the chart. `area` is cleared first; the caller flushes.
pub fn draw(out: &mut impl Write, chart: &Chart, area: Area) -> io::Result<()> {
    let blank = " ".repeat(usize::from(area.width));
    for row in area.y..area.y + area.height {
        queue!(out, cursor::MoveTo(area.x, row), Print(&blank))?;
    }

    for bar in &chart.bars {
        let fill: String = std::iter::repeat_n(BLOCK, usize::from(bar.width)).collect();
        queue!(out, SetForegroundColor(color(bar.state)))?;
        for level in 0..bar.height {
            queue!(out, cursor::MoveTo(bar.x, chart.baseline - level), Print(&fill))?;
        }
        if let Some(row) = chart.label_row {
            let label = format!("{:^width$}", bar.value, width = usize::from(bar.width));
            queue!(out, cursor::MoveTo(bar.x, row), Print(label))?;
        }
    }
    queue!(out, ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Area = Area::new(2, 1, 40, 10);

    #[test]
    fn tallest_value_fills_the_area() {
        let chart = layout(&[10, 20, 40], &HighlightSet::none(), AREA);
        let heights: Vec<_> = chart.bars.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![3, 5, 9]);
        assert_eq!(chart.label_row, Some(10));
        assert_eq!(chart.baseline, 9);
    }

    #[test]
    fn bars_are_spaced_when_room_allows() {
        let chart = layout(&[1, 2, 3, 4], &HighlightSet::none(), AREA);
        assert_eq!(chart.bars[0].x, 2);
        assert_eq!(chart.bars[0].width, 9);
        assert_eq!(chart.bars[1].x, 12);
    }

    #[test]
    fn highlights_map_to_bars() {
        let hl = HighlightSet::pair(Highlight::Swapping, 0, 2);
        let chart = layout(&[5, 6, 7], &hl, AREA);
        let states: Vec<_> = chart.bars.iter().map(|b| b.state).collect();
        assert_eq!(
            states,
            vec![Some(Highlight::Swapping), None, Some(Highlight::Swapping)]
        );
    }

    #[test]
    fn many_values_share_columns() {
        let values: Vec<u32> = (1..=200).collect();
        let hl = HighlightSet::single(Highlight::Pivot, 199);
        let chart = layout(&values, &hl, AREA);
        assert_eq!(chart.bars.len(), 40);
        assert!(chart.label_row.is_none());
        let last = chart.bars.last().unwrap();
        assert_eq!(last.value, 200);
        assert_eq!(last.state, Some(Highlight::Pivot));
        assert_eq!(last.height, 10);
    }

    #[test]
    fn labels_need_room() {
        let values: Vec<u32> = (0..20).map(|i| 100 + i).collect();
        // 40 columns / 20 bars = 2 cells per bar; too narrow for 3 digits.
        let chart = layout(&values, &HighlightSet::none(), AREA);
        assert!(chart.label_row.is_none());
    }

    #[test]
    fn empty_input_draws_nothing() {
        assert_eq!(layout(&[], &HighlightSet::none(), AREA), Chart::default());
        let mut out = Vec::new();
        draw(&mut out, &Chart::default(), AREA).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn digit_counts() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(309), 3);
    }
}
