pub mod iot_client;
pub mod radar_client;
pub mod satellite_client;
