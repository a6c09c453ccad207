//! # Text Reports
//!
//! Plain-text renderings of an assessment for the terminal:
//! - a `Weight (%)` table, one decimal, criteria in input order
//! - a horizontal bar chart, one bar per criterion, largest first
//! - the judgment scale with its numeric values

use saaty_core::{Assessment, Intensity, Locale, Priority};
use std::fmt::Write;

/// Width of a 100% bar, in characters.
pub const BAR_WIDTH: usize = 40;

const BAR_CHAR: char = '█';

/// Column and section titles in one language.
struct Headings {
    title: &'static str,
    criterion: &'static str,
    weight: &'static str,
    chart: &'static str,
    scale: &'static str,
    value: &'static str,
}

const fn headings(locale: Locale) -> Headings {
    match locale {
        Locale::En => Headings {
            title: "Computed weights",
            criterion: "Criterion",
            weight: "Weight (%)",
            chart: "Distribution",
            scale: "Judgment",
            value: "Value",
        },
        Locale::Es => Headings {
            title: "Pesos calculados",
            criterion: "Criterio",
            weight: "Peso (%)",
            chart: "Distribución",
            scale: "Juicio",
            value: "Valor",
        },
    }
}

fn width_of(text: &str) -> usize {
    text.chars().count()
}

// =============================================================================
// WEIGHT TABLE
// =============================================================================

/// Two-column table of criterion and weight percentage.
pub fn weight_table(priorities: &[Priority], locale: Locale) -> String {
    let h = headings(locale);
    let label_width = priorities
        .iter()
        .map(|p| width_of(&p.criterion))
        .chain(std::iter::once(width_of(h.criterion)))
        .max()
        .unwrap_or(0);
    let weight_width = width_of(h.weight);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<lw$}  {:>ww$}",
        h.criterion,
        h.weight,
        lw = label_width,
        ww = weight_width
    );
    let _ = writeln!(
        out,
        "{}  {}",
        "-".repeat(label_width),
        "-".repeat(weight_width)
    );
    for p in priorities {
        let _ = writeln!(
            out,
            "{:<lw$}  {:>ww$.1}",
            p.criterion,
            p.percent,
            lw = label_width,
            ww = weight_width
        );
    }
    out
}

// =============================================================================
// BAR CHART
// =============================================================================

/// Horizontal bars proportional to each share of the whole.
///
/// Bars are sorted by descending weight. A non-zero weight always gets at
/// least one character.
pub fn bar_chart(priorities: &[Priority], width: usize) -> String {
    let mut ranked = priorities.to_vec();
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let label_width = ranked
        .iter()
        .map(|p| width_of(&p.criterion))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for p in &ranked {
        let mut length = (p.weight * width as f64).round() as usize;
        if length == 0 && p.weight > 0.0 {
            length = 1;
        }
        let bar: String = std::iter::repeat_n(BAR_CHAR, length.min(width)).collect();
        let _ = writeln!(
            out,
            "{:<lw$} | {:<bw$} {:>5.1}%",
            p.criterion,
            bar,
            p.percent,
            lw = label_width,
            bw = width
        );
    }
    out
}

// =============================================================================
// FULL REPORT
// =============================================================================

/// Title, weight table and bar chart.
pub fn render(assessment: &Assessment, locale: Locale) -> String {
    let h = headings(locale);
    let priorities = assessment.priorities();

    let mut out = String::new();
    let _ = writeln!(out, "{}", h.title);
    let _ = writeln!(out, "{}", "=".repeat(width_of(h.title)));
    out.push_str(&weight_table(&priorities, locale));
    out.push('\n');
    let _ = writeln!(out, "{}", h.chart);
    out.push_str(&bar_chart(&priorities, BAR_WIDTH));
    out
}

/// The five scale levels with labels in `locale`.
pub fn scale_table(locale: Locale) -> String {
    let h = headings(locale);
    let label_width = Intensity::ALL
        .iter()
        .map(|i| width_of(i.label(locale)))
        .chain(std::iter::once(width_of(h.scale)))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{:<lw$}  {}", h.scale, h.value, lw = label_width);
    for intensity in Intensity::ALL {
        let _ = writeln!(
            out,
            "{:<lw$}  {} (1/{})",
            intensity.label(locale),
            intensity.scale(),
            intensity.scale(),
            lw = label_width
        );
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
