use super::palette::{
    self, ANNOTATION_GREEN, ANNOTATION_RED, DARK_SLATE, FADE, FIREBRICK, MISSING_CELL, PIE_COLORS,
    TOMATO, WINE,
};
use crate::domain::model::{CorrelationMatrix, Metric, Peak, Table};
use crate::utils::error::Result;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const BAR_WIDTH: f64 = 0.25;
const GRADIENT_STEPS: usize = 120;
const GRADIENT_ALPHA: f64 = 0.2;
const COLORBAR_STEPS: usize = 100;

pub(crate) fn text_style(size: i32, bold: bool, color: &RGBColor) -> TextStyle<'static> {
    let font = ("sans-serif", size).into_font();
    let font = if bold {
        font.style(FontStyle::Bold)
    } else {
        font
    };
    font.color(color)
}

fn caption_style() -> TextStyle<'static> {
    text_style(20, true, &DARK_SLATE)
}

/// 左上：各年份酒鋪、飲酒人數、死亡人數的分組長條圖
pub fn draw_bar_panel(area: &Area, table: &Table) -> Result<()> {
    let n = table.len() as f64;
    let consumers = table.column(Metric::Consumers);
    let y_max = consumers.iter().copied().fold(0.0, f64::max) + 1000.0;

    let mut chart = ChartBuilder::on(area)
        .caption("Alcohol Trends Over Years", caption_style())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..n - 0.5, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Count")
        .draw()?;

    // 水平漸層背景
    let step = n / GRADIENT_STEPS as f64;
    chart.draw_series((0..GRADIENT_STEPS).map(|i| {
        let x0 = -0.5 + step * i as f64;
        let t = i as f64 / (GRADIENT_STEPS - 1) as f64;
        let color = palette::lerp(FADE, WINE, t);
        Rectangle::new(
            [(x0, 0.0), (x0 + step, y_max)],
            color.mix(GRADIENT_ALPHA).filled(),
        )
    }))?;

    let groups = [
        (Metric::WineShops, WINE, -BAR_WIDTH),
        (Metric::Consumers, FIREBRICK, 0.0),
        (Metric::Deaths, TOMATO, BAR_WIDTH),
    ];
    for (metric, color, offset) in groups {
        let values = table.column(metric);
        chart
            .draw_series(values.iter().enumerate().map(|(i, v)| {
                let center = i as f64 + offset;
                Rectangle::new(
                    [
                        (center - BAR_WIDTH / 2.0, 0.0),
                        (center + BAR_WIDTH / 2.0, *v),
                    ],
                    color.filled(),
                )
            }))?
            .label(metric.label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    draw_year_labels(&mut chart, &table.years())?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// 右上：飲酒人數與死亡人數折線圖，附峰值標註
pub fn draw_line_panel(
    area: &Area,
    table: &Table,
    peak_consumption: &Peak,
    peak_deaths: &Peak,
) -> Result<()> {
    let n = table.len() as f64;
    let consumers = table.column(Metric::Consumers);
    let deaths = table.column(Metric::Deaths);
    let y_max = consumers.iter().copied().fold(0.0, f64::max) + 1500.0;

    let mut chart = ChartBuilder::on(area)
        .caption("Consumption vs Deaths Trend", caption_style())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..n - 0.5, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Count")
        .draw()?;

    chart
        .draw_series(
            LineSeries::new(
                consumers.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                FIREBRICK.stroke_width(2),
            )
            .point_size(4),
        )?
        .label("Consumers")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], FIREBRICK.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            deaths.iter().enumerate().map(|(i, v)| (i as f64, *v)),
            TOMATO.stroke_width(2),
        ))?
        .label("Deaths")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TOMATO.stroke_width(2)));
    chart.draw_series(deaths.iter().enumerate().map(|(i, v)| {
        EmptyElement::at((i as f64, *v)) + Rectangle::new([(-4, -4), (4, 4)], TOMATO.filled())
    }))?;

    draw_arrow_annotation(
        &mut chart,
        "Peak Consumption",
        (peak_consumption.index as f64, peak_consumption.value as f64),
        500.0,
        ANNOTATION_GREEN,
    )?;
    draw_arrow_annotation(
        &mut chart,
        "Peak Deaths",
        (peak_deaths.index as f64, peak_deaths.value as f64),
        50.0,
        ANNOTATION_RED,
    )?;

    draw_year_labels(&mut chart, &table.years())?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// 文字置於資料點正上方 `lift` 處，箭頭指向資料點
fn draw_arrow_annotation(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    text: &str,
    point: (f64, f64),
    lift: f64,
    color: RGBColor,
) -> Result<()> {
    let tip = chart.backend_coord(&point);
    let anchor = chart.backend_coord(&(point.0, point.1 + lift));
    let (dx, dy) = ((anchor.0 - tip.0) as f64, (anchor.1 - tip.1) as f64);
    let length = (dx * dx + dy * dy).sqrt();

    let label = Text::new(
        text.to_string(),
        (dx.round() as i32, dy.round() as i32 - 2),
        text_style(14, true, &color).pos(Pos::new(HPos::Center, VPos::Bottom)),
    );

    if length < 1.0 {
        chart.draw_series(std::iter::once(EmptyElement::at(point) + label))?;
        return Ok(());
    }

    // 箭頭方向：由文字指向資料點
    let (ux, uy) = (-dx / length, -dy / length);
    let head = 10.0_f64.min(length);
    let back = (-ux * head, -uy * head);
    let side = (-uy * head / 2.0, ux * head / 2.0);
    let arrow_head = Polygon::new(
        vec![
            (0, 0),
            (
                (back.0 + side.0).round() as i32,
                (back.1 + side.1).round() as i32,
            ),
            (
                (back.0 - side.0).round() as i32,
                (back.1 - side.1).round() as i32,
            ),
        ],
        color.filled(),
    );
    let shaft = PathElement::new(
        vec![(0, 0), (dx.round() as i32, dy.round() as i32)],
        color.stroke_width(2),
    );

    chart.draw_series(std::iter::once(
        EmptyElement::at(point) + shaft + arrow_head + label,
    ))?;
    Ok(())
}

fn draw_year_labels(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    years: &[i32],
) -> Result<()> {
    let style = text_style(13, false, &BLACK).pos(Pos::new(HPos::Center, VPos::Top));
    chart.draw_series(years.iter().enumerate().map(|(i, year)| {
        EmptyElement::at((i as f64, 0.0)) + Text::new(year.to_string(), (0, 8), style.clone())
    }))?;
    Ok(())
}

/// 左下：最後一年的年齡層占比圓餅圖
pub fn draw_pie_panel(area: &Area, table: &Table) -> Result<()> {
    let Some(last) = table.last() else {
        return Ok(());
    };
    let body = area.titled(
        &format!("{} Age-wise Consumption", last.year),
        caption_style(),
    )?;

    let shares = [
        last.age_18_30 as f64,
        last.age_31_50 as f64,
        last.age_51_plus as f64,
    ];
    let sizes = clamp_shares(&shares);
    if sizes.iter().sum::<f64>() <= 0.0 {
        tracing::warn!(
            "⚠️ No positive age-band shares for {}, skipping pie chart",
            last.year
        );
        let (w, h) = body.dim_in_pixel();
        body.draw_text(
            "No positive age-band data to display",
            &text_style(16, false, &DARK_SLATE).pos(Pos::new(HPos::Center, VPos::Center)),
            (w as i32 / 2, h as i32 / 2),
        )?;
        return Ok(());
    }
    if sizes != shares {
        tracing::warn!(
            "⚠️ Negative age-band share in {} drawn as an empty wedge: {:?}",
            last.year,
            shares
        );
    }

    let (w, h) = body.dim_in_pixel();
    let base = body.get_base_pixel();
    // Pie 使用後端絕對座標
    let center = (base.0 + w as i32 / 2, base.1 + h as i32 / 2);
    let radius = w.min(h) as f64 * 0.36;
    let labels = [
        Metric::Age18To30.label(),
        Metric::Age31To50.label(),
        Metric::Age51Plus.label(),
    ];

    let mut pie = Pie::new(&center, &radius, &sizes, &PIE_COLORS, &labels);
    pie.start_angle(140.0);
    pie.label_style(text_style(15, false, &DARK_SLATE));
    pie.percentages(text_style(14, true, &WHITE));
    body.draw(&pie)?;
    Ok(())
}

/// 負值占比只在幾何上視為 0
pub(crate) fn clamp_shares(shares: &[f64; 3]) -> [f64; 3] {
    shares.map(|s| if s > 0.0 { s } else { 0.0 })
}

/// 右下：相關係數熱圖與色條
pub fn draw_heatmap_panel(area: &Area, matrix: &CorrelationMatrix) -> Result<()> {
    let n = matrix.size();
    let range = palette::value_range(matrix.values.iter().flatten().copied());
    let (width, _) = area.dim_in_pixel();
    let (cells_area, bar_area) = area.split_horizontally(width.saturating_sub(100));

    let size = n as f64;
    let mut chart = ChartBuilder::on(&cells_area)
        .caption("Correlation Heatmap", caption_style())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..size, 0.0..size)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|_| String::new())
        .draw()?;

    // 第 0 列畫在最上方
    let cell_top = |row: usize| size - row as f64;
    let mut cells = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            cells.push((row, col, matrix.get(row, col)));
        }
    }

    chart.draw_series(cells.iter().map(|&(row, col, value)| {
        let color = if value.is_nan() {
            MISSING_CELL
        } else {
            palette::reds(palette::normalize(value, range))
        };
        Rectangle::new(
            [
                (col as f64, cell_top(row)),
                (col as f64 + 1.0, cell_top(row) - 1.0),
            ],
            color.filled(),
        )
    }))?;

    chart.draw_series(cells.iter().map(|&(row, col, value)| {
        let shade = if value.is_nan() {
            0.0
        } else {
            palette::normalize(value, range)
        };
        let color = if shade > 0.6 { WHITE } else { BLACK };
        EmptyElement::at((col as f64 + 0.5, cell_top(row) - 0.5))
            + Text::new(
                format_cell(value),
                (0, 0),
                text_style(16, false, &color).pos(Pos::new(HPos::Center, VPos::Center)),
            )
    }))?;

    let x_style = text_style(13, false, &BLACK).pos(Pos::new(HPos::Center, VPos::Top));
    let y_style = text_style(13, false, &BLACK).pos(Pos::new(HPos::Right, VPos::Center));
    chart.draw_series(matrix.labels.iter().enumerate().map(|(i, metric)| {
        EmptyElement::at((i as f64 + 0.5, 0.0))
            + Text::new(metric.column_name(), (0, 8), x_style.clone())
    }))?;
    chart.draw_series(matrix.labels.iter().enumerate().map(|(i, metric)| {
        EmptyElement::at((0.0, cell_top(i) - 0.5))
            + Text::new(metric.column_name(), (-8, 0), y_style.clone())
    }))?;

    draw_colorbar(&bar_area, range)
}

pub(crate) fn format_cell(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn draw_colorbar(area: &Area, (min, max): (f64, f64)) -> Result<()> {
    let mut bar = ChartBuilder::on(area)
        .margin_top(45)
        .margin_bottom(45)
        .margin_right(10)
        .right_y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, min..max)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_label_formatter(&|v| format!("{:.2}", v))
        .y_label_style(text_style(12, false, &BLACK))
        .draw()?;

    let step = (max - min) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let low = min + step * i as f64;
        let color = palette::reds((i as f64 + 0.5) / COLORBAR_STEPS as f64);
        Rectangle::new([(0.0, low), (1.0, low + step)], color.filled())
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_shares_zeroes_negatives() {
        assert_eq!(
            clamp_shares(&[3344.0, 2544.0, -367.0]),
            [3344.0, 2544.0, 0.0]
        );
        assert_eq!(clamp_shares(&[1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(0.12345), "0.12");
        assert_eq!(format_cell(-1.0), "-1.00");
        assert_eq!(format_cell(f64::NAN), "nan");
    }

    #[test]
    fn test_bar_panel_draws_into_buffer() {
        let table = Table::new(vec![crate::domain::model::YearlyRecord {
            year: 2016,
            wine_shops: 200,
            consumers: 8000,
            deaths: 300,
            age_18_30: 3000,
            age_31_50: 2000,
            age_51_plus: 3000,
        }]);
        let (w, h) = (400u32, 300u32);
        let mut buffer = vec![255u8; (w * h * 3) as usize];
        {
            let area = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            draw_bar_panel(&area, &table).unwrap();
            area.present().unwrap();
        }
        assert!(buffer.iter().any(|b| *b != 255));
    }

    #[test]
    fn test_colorbar_draws_tick_labels() {
        let (w, h) = (100u32, 300u32);
        let mut buffer = vec![255u8; (w * h * 3) as usize];
        {
            let area = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            draw_colorbar(&area, (-0.5, 1.0)).unwrap();
            area.present().unwrap();
        }

        // 色條右側 50px 是刻度文字區，文字為黑色
        let dark_text = (0..h)
            .flat_map(|y| (46..w - 10).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                let i = ((y * w + x) * 3) as usize;
                let [r, g, b] = [buffer[i], buffer[i + 1], buffer[i + 2]];
                r < 128 && r.abs_diff(g) < 16 && r.abs_diff(b) < 16
            })
            .count();
        assert!(dark_text > 50, "only {} dark label pixels", dark_text);
    }

    #[test]
    fn test_heatmap_panel_draws_cells_and_colorbar() {
        use crate::core::aggregator::correlation_matrix;

        let table = Table::new(
            (0..4)
                .map(|i| crate::domain::model::YearlyRecord {
                    year: 2016 + i,
                    wine_shops: 100 + i as u32 * 10,
                    consumers: 5000 + i as u32 * 300,
                    deaths: 100 + (i as u32 % 2) * 50,
                    age_18_30: 2000,
                    age_31_50: 1500 + i as u32 * 100,
                    age_51_plus: 500,
                })
                .collect(),
        );
        let matrix = correlation_matrix(&table, &Metric::ALL[1..4]);
        let (w, h) = (500u32, 400u32);
        let mut buffer = vec![255u8; (w * h * 3) as usize];
        {
            let area = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            draw_heatmap_panel(&area, &matrix).unwrap();
            area.present().unwrap();
        }
        let colorbar_ink = (0..h)
            .flat_map(|y| (w - 100..w).map(move |x| ((y * w + x) * 3) as usize))
            .filter(|&i| buffer[i] != 255)
            .count();
        assert!(colorbar_ink > 0);
    }

    #[test]
    fn test_pie_panel_with_no_positive_share_shows_notice() {
        let table = Table::new(vec![crate::domain::model::YearlyRecord {
            year: 2025,
            wine_shops: 200,
            consumers: 0,
            deaths: 0,
            age_18_30: 0,
            age_31_50: 0,
            age_51_plus: 0,
        }]);
        let (w, h) = (300u32, 300u32);
        let mut buffer = vec![255u8; (w * h * 3) as usize];
        {
            let area = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            draw_pie_panel(&area, &table).unwrap();
            area.present().unwrap();
        }
        assert!(buffer.iter().any(|b| *b != 255));
    }
}
