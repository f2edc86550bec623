//! demos/graph_rain.rs
//!
//! Fetches a week of rain-gauge readings for one city and plots the rain
//! values over time with the `plotlars` crate.
//!
//! To run this demo:
//! cargo run --example graph_rain --features demos

use heavyrain::{HeavyRain, HeavyRainError};
use plotlars::{Legend, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::DataFrame;

#[tokio::main]
async fn main() -> Result<(), HeavyRainError> {
    env_logger::init();
    println!("Fetching rain-gauge data...");

    let client = HeavyRain::new()?;

    let data = client
        .iot()
        .fetch()
        .city("Dortmund")
        .hours(168)
        .call()
        .await?;

    data.ensure_non_empty()?;

    // Only rows with a usable rain value; coercion failures are already
    // nulls in the raw frame and excluded here.
    let frame = data.plot_frame()?;

    println!("Generating rain plot...");
    plot_rain(&frame);
    println!("Plot shown in browser.");

    Ok(())
}

/// Plots the rain from the frame's 'timestamp' and 'rain_value' columns.
fn plot_rain(data: &DataFrame) {
    TimeSeriesPlot::builder()
        .data(&data)
        .x("timestamp")
        .y("rain_value")
        .size(8)
        .colors(vec![Rgb(69, 157, 230)])
        .plot_title(Text::from("heavyRAIN gauge readings").font("Arial").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("time")
        .y_title("rain [mm]")
        .build()
        .plot();
}
