use super::palette::{DARK_SLATE, FOOTER_FILL, WINE};
use super::panels::{text_style, Area};
use crate::domain::model::{Aggregates, Table};
use crate::utils::error::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub const NOTE_HEIGHT: u32 = 56;
const FOOTER_BOX: (i32, i32) = (460, 56);

pub fn suptitle(table: &Table) -> String {
    match (table.first(), table.last()) {
        (Some(first), Some(last)) => format!(
            "Alcohol Consumption, Wine Shops & Deaths Analysis ({}–{})",
            first.year, last.year
        ),
        _ => "Alcohol Consumption, Wine Shops & Deaths Analysis".to_string(),
    }
}

pub fn note_lines(aggregates: &Aggregates) -> [String; 2] {
    [
        format!(
            "Highest Consumption Year: {} ({} consumers)",
            aggregates.peak_consumption.year, aggregates.peak_consumption.value
        ),
        format!(
            "Highest Deaths Year: {} ({} deaths)",
            aggregates.peak_deaths.year, aggregates.peak_deaths.value
        ),
    ]
}

pub fn footer_lines(author: &str, year: i32) -> [String; 2] {
    [
        "Thank you for viewing this dashboard!".to_string(),
        format!("Created by {} | {}", author, year),
    ]
}

/// 圖表區左下角的摘要文字
pub fn draw_summary_note(area: &Area, aggregates: &Aggregates) -> Result<()> {
    let style = text_style(16, true, &DARK_SLATE).pos(Pos::new(HPos::Left, VPos::Top));
    for (i, line) in note_lines(aggregates).iter().enumerate() {
        area.draw_text(line, &style, (20, 6 + i as i32 * 22))?;
    }
    Ok(())
}

/// 頁尾：置中的外框文字方塊
pub fn draw_footer(area: &Area, author: &str, year: i32) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (cx, cy) = (w as i32 / 2, h as i32 / 2);
    let (bw, bh) = FOOTER_BOX;
    let corners = [(cx - bw / 2, cy - bh / 2), (cx + bw / 2, cy + bh / 2)];

    area.draw(&Rectangle::new(corners, FOOTER_FILL.filled()))?;
    area.draw(&Rectangle::new(corners, WINE.stroke_width(2)))?;

    let style = text_style(15, true, &WINE).pos(Pos::new(HPos::Center, VPos::Center));
    let [thanks, credit] = footer_lines(author, year);
    area.draw_text(&thanks, &style, (cx, cy - 12))?;
    area.draw_text(&credit, &style, (cx, cy + 12))?;
    Ok(())
}
