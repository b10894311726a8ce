//! Build a small multi-figure report, the way the exploratory notebook did:
//! a couple of Plotly figures combined into one HTML file, then a logo
//! header spliced in front when a logo path is supplied.
//!
//! Usage: `cargo run --example combined_report [path/to/logo.png]`
use anyhow::Result;
use plotly::common::Mode;
use plotly::layout::{Axis, Layout};
use plotly::{Histogram, Plot, Scatter};

use pathflow_report::html::{prepend_logo_header, write_figures_html};
use pathflow_report::logo::logo_data_uri;

fn admissions_figure() -> Plot {
    let days: Vec<f64> = (0..28).map(|day| day as f64).collect();
    let admissions: Vec<f64> = days
        .iter()
        .map(|day| 20.0 + 6.0 * (day / 7.0 * std::f64::consts::PI).sin())
        .collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(days, admissions)
            .mode(Mode::LinesMarkers)
            .name("Admissions"),
    );
    plot.set_layout(
        Layout::new()
            .title("Daily admissions")
            .x_axis(Axis::new().title("Day"))
            .y_axis(Axis::new().title("Patients")),
    );
    plot
}

fn length_of_stay_figure() -> Plot {
    let stays: Vec<f64> = (0..200)
        .map(|i| 1.0 + f64::from(i % 9) + f64::from(i % 4) * 0.5)
        .collect();

    let mut plot = Plot::new();
    plot.add_trace(Histogram::new(stays).name("Length of stay"));
    plot.set_layout(
        Layout::new()
            .title("Length of stay distribution")
            .x_axis(Axis::new().title("Days"))
            .y_axis(Axis::new().title("Count")),
    );
    plot
}

fn main() -> Result<()> {
    env_logger::init();

    let figures = vec![admissions_figure(), length_of_stay_figure()];
    let output = "combined_report.html";
    write_figures_html(
        &figures,
        output,
        Some("<hr style=\"margin: 24px 0\">"),
        Some(&[450, 400]),
    )?;

    if let Some(logo_path) = std::env::args().nth(1) {
        let uri = logo_data_uri(&logo_path)?;
        prepend_logo_header(output, &uri, "Weekly patient flow report")?;
    }

    println!("Report saved to {}", output);
    Ok(())
}
