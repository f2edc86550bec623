use chrono::Utc;
use heavyrain::{HeavyRain, HeavyRainError, RadarQuality, RadarRegion};

#[tokio::main]
async fn main() -> Result<(), HeavyRainError> {
    env_logger::init();

    let client = HeavyRain::new()?;

    // What did the NRW composite record in the last 24 hours?
    let scans = client
        .radar()
        .list()
        .hours(24)
        .region(RadarRegion::Nrw)
        .quality(RadarQuality::Q1)
        .call()
        .await?;

    println!("{} scans in the last 24h", scans.len());
    for scan in scans.iter().take(5) {
        println!("  {}  {}", scan.sensing_start, scan.file_name);
    }

    // Pull today's files into a scratch directory.
    let dest = tempfile::tempdir().expect("temp dir");
    let files = client
        .radar()
        .download_for_date()
        .region(RadarRegion::Nrw)
        .quality(RadarQuality::Q1)
        .date(Utc::now())
        .destination(dest.path().to_path_buf())
        .call()
        .await?;

    println!("downloaded {} .scu files to {:?}", files.len(), dest.path());

    Ok(())
}
