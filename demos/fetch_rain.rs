use heavyrain::{HeavyRain, HeavyRainError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), HeavyRainError> {
    // Set RUST_LOG=info (or debug) to watch the pagination progress.
    env_logger::init();
    configure_polars_display();

    let client = HeavyRain::new()?;

    let data = client
        .iot()
        .fetch()
        .city("Dortmund")
        .hours(72)
        .page_size(500)
        .call()
        .await?;

    if data.ensure_non_empty().is_err() {
        println!("No readings in the last 72 hours.");
        return Ok(());
    }

    println!(
        "Fetched {} readings in {} page(s).",
        data.len(),
        data.pages()
    );
    println!("{}", data.frame()?.head(Some(10)));

    let plot = data.plot_frame()?;
    println!(
        "{} of {} readings have a usable rain value.",
        plot.height(),
        data.len()
    );

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
