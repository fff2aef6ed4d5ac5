use anyhow::Result;
use pipecut_core::CuttingPlan;
use std::fmt::Write;

const MARGIN: f64 = 20.0;
const BAR_WIDTH_PX: f64 = 800.0;
const BAR_HEIGHT_PX: f64 = 24.0;
const BAR_SPACING: f64 = 40.0;

/// Draws every bar of the plan as a horizontal strip, pieces in green and
/// the trailing offcut in grey.
pub fn render_plan_svg(plan: &CuttingPlan) -> Result<String> {
    let mut svg = String::new();
    let scale = if plan.stock.length > 0.0 {
        BAR_WIDTH_PX / plan.stock.length
    } else {
        0.0
    };

    let svg_width = BAR_WIDTH_PX + 2.0 * MARGIN;
    let svg_height =
        MARGIN * 2.0 + plan.patterns.len() as f64 * (BAR_HEIGHT_PX + BAR_SPACING) + 20.0;

    writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        svg_width, svg_height, svg_width, svg_height
    )?;
    writeln!(
        &mut svg,
        r##"  <rect width="100%" height="100%" fill="#f5f5f5"/>"##
    )?;

    let mut y_offset = MARGIN + 16.0;

    for pattern in &plan.patterns {
        writeln!(
            &mut svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#333">Bar {} ({:.1}%)</text>"##,
            MARGIN,
            y_offset - 4.0,
            pattern.bar_index,
            pattern.efficiency
        )?;
        writeln!(
            &mut svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#fff" stroke="#333" stroke-width="1"/>"##,
            MARGIN, y_offset, BAR_WIDTH_PX, BAR_HEIGHT_PX
        )?;

        for segment in &pattern.segments {
            let x = MARGIN + segment.position * scale;
            let width = segment.length * scale;
            let (fill, stroke) = if segment.is_waste {
                ("#bdbdbd", "#757575")
            } else {
                ("#4CAF50", "#2E7D32")
            };

            writeln!(
                &mut svg,
                r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="1" opacity="0.8"/>"##,
                x, y_offset, width, BAR_HEIGHT_PX, fill, stroke
            )?;

            if !segment.is_waste {
                writeln!(
                    &mut svg,
                    r##"  <text x="{}" y="{}" font-family="Arial" font-size="10" fill="#fff" text-anchor="middle">{:.3}</text>"##,
                    x + width / 2.0,
                    y_offset + BAR_HEIGHT_PX / 2.0 + 3.0,
                    segment.length
                )?;
            }
        }

        y_offset += BAR_HEIGHT_PX + BAR_SPACING;
    }

    writeln!(
        &mut svg,
        r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#666">Bars: {} of {} | Efficiency: {:.1}% | Waste: {:.3} m</text>"##,
        MARGIN,
        svg_height - MARGIN,
        plan.metrics.stock_used,
        plan.metrics.stock_total,
        plan.metrics.efficiency,
        plan.metrics.waste_total
    )?;
    writeln!(&mut svg, "</svg>")?;

    Ok(svg)
}
